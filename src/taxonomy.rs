//! Category → property taxonomy consulted by the segmenter.
//!
//! Categories and properties keep their declaration order; that order is the
//! order labels are recorded in.

use regex::Regex;

use crate::Result;

/// The built-in table.
const STANDARD: &[(&str, &[&str])] = &[
    ("numerical", &[
        "angle", "length", "width", "height", "area", "volume", "radius", "diameter",
        "circumference", "perimeter", "density", "velocity", "acceleration", "frequency",
        "wavelength", "amplitude", "pixel count", "resolution", "coordinate", "scale factor",
    ]),
    ("computer_file", &[
        "file name", "file type", "extension", "size on disk", "creation date",
        "modification date", "access date", "owner", "permissions", "attributes",
        "version number", "compatibility mode", "security settings", "checksum", "location",
        "path", "compression status", "archive bit", "digital signature", "author", "title",
        "comments",
    ]),
    ("text", &[
        "font family", "font size", "font weight", "font style", "color", "alignment",
        "line spacing", "letter spacing", "word spacing", "rotation angle", "opacity",
        "shadow offset", "border style", "margin", "padding", "encoding", "language", "case",
        "hyphenation", "ligatures",
    ]),
    ("material", &[
        "state", "mass", "density", "volume", "energy", "temperature", "melting point",
        "boiling point", "hardness", "tensile strength", "conductivity", "malleability",
        "ductility", "brittleness", "viscosity", "elasticity", "refractive index",
        "specific heat capacity", "ph level", "solubility",
    ]),
    ("video", &[
        "frame rate", "fps", "resolution", "duration", "bitrate", "codec", "aspect ratio",
        "pixel depth", "audio channels", "sample rate", "audio bitrate", "subtitle language",
        "keyframe interval", "color space", "compression type", "file format", "metadata tags",
        "brightness", "contrast", "saturation", "timestamp",
    ]),
    ("geometry", &[
        "vertices", "edges", "faces", "centroid", "apothem", "inradius", "circumradius",
        "symmetry", "tessellation", "fractal dimension",
    ]),
    ("image", &[
        "bit depth", "color mode", "contrast ratio", "histogram", "file format", "exif data",
        "gamma", "noise level", "sharpening radius", "layer blend mode", "opacity",
    ]),
    ("audio", &[
        "sample rate", "bit rate", "channels", "dynamic range", "frequency response", "pitch",
        "tempo", "reverb time", "waveform shape", "compression ratio", "amplitude",
    ]),
    ("software", &[
        "class name", "id", "visibility", "inheritance", "mutability", "scope",
        "default value", "event handlers", "thread safety", "serialization",
    ]),
    ("biological", &[
        "genus", "species", "habitat", "lifespan", "genome size", "metabolic rate",
        "reproductive strategy", "body symmetry", "cell type", "enzyme activity",
        "toxicity level", "trophic level", "photosynthetic efficiency", "mutation rate",
        "biodiversity index", "osmoregulation", "allele frequency", "endangerment status",
        "biomass", "hormone receptor density", "ecological niche",
    ]),
    ("physics", &[
        "force", "mass", "acceleration", "velocity", "time", "distance", "energy", "kinetic",
        "potential", "frequency", "amplitude", "wavelength", "momentum", "impulse",
    ]),
    ("chemistry", &[
        "atomic number", "atomic mass", "electron configuration", "bond type",
        "electronegativity", "polarity", "reaction rate", "temperature", "activation energy",
        "ph", "concentration", "equilibrium constant", "oxidation state", "redox potential",
    ]),
    ("environmental", &[
        "temperature", "humidity", "dew point", "biodiversity index", "habitat fragmentation",
        "species richness", "carbon footprint", "energy consumption", "emission factor",
        "soil ph", "nutrient availability", "plant growth rate", "pollution level",
        "bioaccumulation",
    ]),
];

/// A known property and its compiled value pattern.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    lowered: String,
    value_pattern: Regex,
}

impl Property {
    fn compile(name: &str) -> Result<Self> {
        // Lazy gap, then the first ASCII decimal number on the same line.
        let value_pattern = Regex::new(&format!(r"(?i){}.*?([0-9]+(?:\.[0-9]+)?)", regex::escape(name)))?;
        Ok(Self {
            name: name.to_owned(),
            lowered: name.to_lowercase(),
            value_pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive substring test against an already lower-cased text.
    pub fn occurs_in(&self, lowered_text: &str) -> bool {
        lowered_text.contains(&self.lowered)
    }

    /// First number following the property in `text`, if any.
    pub fn capture_value(&self, text: &str) -> Option<f64> {
        self.value_pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }
}

/// One category and its ordered properties.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    properties: Vec<Property>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Ordered category → property table.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Build a taxonomy from `(category, properties)` entries.
    pub fn new<C, P, S>(entries: impl IntoIterator<Item = (C, P)>) -> Result<Self>
    where
        C: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories = Vec::new();
        for (name, props) in entries {
            let properties = props
                .into_iter()
                .map(|p| Property::compile(p.as_ref()))
                .collect::<Result<Vec<_>>>()?;
            categories.push(Category { name: name.into(), properties });
        }
        Ok(Self { categories })
    }

    /// The built-in 13-category table.
    pub fn standard() -> Result<Self> {
        Self::new(STANDARD.iter().map(|(c, props)| (*c, props.iter().copied())))
    }

    /// A taxonomy with no categories; tags nothing.
    pub fn empty() -> Self {
        Self { categories: Vec::new() }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Property names of `category`, in declaration order.
    pub fn properties(&self, category: &str) -> Vec<&str> {
        self.category(category)
            .map(|c| c.properties.iter().map(Property::name).collect())
            .unwrap_or_default()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every (category, property) pair, in scan order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.categories
            .iter()
            .flat_map(|c| c.properties.iter().map(move |p| (c.name.as_str(), p)))
    }
}
