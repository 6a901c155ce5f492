use std::io;

use itertools::Itertools;
use quick_xml::{
    events::{BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use tracing::info;

use crate::{
    advisory::{AdvisoryFeature, Position, TransformError},
    config::MapAttributes,
};

pub const POINT_DELIMITER: &str = "/";

/// One filled SIGMET area, `<Infill><Point>P1/P2/...</Point></Infill>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Infill {
    pub points: Vec<String>,
}

impl Infill {
    pub fn from_ring(ring: &[Position]) -> Self {
        let points = ring.iter().map(Position::point_string).collect_vec();
        info!("created polygon with ISO 6709 coordinates {points:?}");
        Self { points }
    }

    pub fn point_text(&self) -> String {
        self.points.iter().join(POINT_DELIMITER)
    }

    fn write<W: io::Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.write_event(Event::Start(BytesStart::new("Infill")))?;
        writer.write_event(Event::Start(BytesStart::new("Point")))?;
        writer.write_event(Event::Text(BytesText::new(&self.point_text())))?;
        writer.write_event(Event::End(BytesEnd::new("Point")))?;
        writer.write_event(Event::End(BytesEnd::new("Infill")))
    }
}

/// `<Maps>` root with exactly one styled `<Map>` holding every infill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapsDocument {
    pub attributes: MapAttributes,
    pub infills: Vec<Infill>,
}

impl MapsDocument {
    pub fn new(attributes: MapAttributes) -> Self {
        Self {
            attributes,
            infills: vec![],
        }
    }

    /// Appends one infill per polygon ring of `feature`, returning how many were added.
    pub fn push_feature(&mut self, feature: &AdvisoryFeature) -> Result<usize, TransformError> {
        let rings = feature.rings()?;
        self.infills
            .extend(rings.iter().map(|ring| Infill::from_ring(ring)));
        Ok(rings.len())
    }

    pub fn from_features(
        attributes: MapAttributes,
        features: &[AdvisoryFeature],
    ) -> Result<Self, TransformError> {
        let mut document = Self::new(attributes);
        for feature in features {
            document.push_feature(feature)?;
        }
        Ok(document)
    }

    /// Pretty printed, without an XML declaration.
    pub fn to_xml(&self) -> io::Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let priority = self.attributes.priority.to_string();
        let map = BytesStart::new("Map").with_attributes([
            ("Type", self.attributes.map_type.as_str()),
            ("Name", self.attributes.name.as_str()),
            ("Priority", priority.as_str()),
            ("CustomColourName", self.attributes.custom_colour_name.as_str()),
        ]);

        writer.write_event(Event::Start(BytesStart::new("Maps")))?;
        if self.infills.is_empty() {
            writer.write_event(Event::Empty(map))?;
        } else {
            writer.write_event(Event::Start(map))?;
            for infill in &self.infills {
                infill.write(&mut writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new("Map")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Maps")))?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        Ok(xml)
    }
}
