//! WMTS GetCapabilities document parsing.
//!
//! Only the parts a tile client needs are read: the layers in `Contents`,
//! the tile matrix sets, and the GetTile endpoints from `OperationsMetadata`.
//! Element names are matched on their local part so the `ows:` prefix (or
//! any other binding of the OWS namespace) does not matter.

use hydromet_common::{BoundingBox, HydroError, HydroResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use tracing::{debug, warn};

use crate::tile_matrix::{TileMatrix, TileMatrixSet};

/// Parsed capabilities document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WmtsCapabilities {
    /// Layers in document order.
    pub layers: Vec<WmtsLayer>,

    /// Tile matrix sets in document order.
    pub tile_matrix_sets: Vec<TileMatrixSet>,

    /// `Get` endpoints of the GetTile operation.
    pub get_tile_endpoints: Vec<OperationEndpoint>,
}

impl WmtsCapabilities {
    pub fn layer(&self, identifier: &str) -> Option<&WmtsLayer> {
        self.layers.iter().find(|l| l.identifier == identifier)
    }

    pub fn tile_matrix_set(&self, identifier: &str) -> Option<&TileMatrixSet> {
        self.tile_matrix_sets
            .iter()
            .find(|s| s.identifier == identifier)
    }
}

/// A layer advertised in `Contents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WmtsLayer {
    pub identifier: String,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub styles: Vec<WmtsStyle>,
    pub formats: Vec<String>,
    /// Identifiers from `TileMatrixSetLink`, in order.
    pub tile_matrix_set_links: Vec<String>,
    pub resource_urls: Vec<ResourceUrl>,
    pub dimensions: Vec<WmtsDimension>,
    pub wgs84_bounding_box: Option<BoundingBox>,
}

impl WmtsLayer {
    /// The style flagged `isDefault`, else the first one.
    pub fn default_style(&self) -> Option<&WmtsStyle> {
        self.styles
            .iter()
            .find(|s| s.is_default)
            .or_else(|| self.styles.first())
    }

    /// `ResourceURL` entries of type `tile`.
    pub fn tile_resource_urls(&self) -> impl Iterator<Item = &ResourceUrl> {
        self.resource_urls
            .iter()
            .filter(|r| r.resource_type.eq_ignore_ascii_case("tile"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WmtsStyle {
    pub identifier: String,
    pub is_default: bool,
}

/// RESTful URL template for a layer resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceUrl {
    pub format: Option<String>,
    pub resource_type: String,
    pub template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WmtsDimension {
    pub identifier: String,
    pub default: Option<String>,
    pub values: Vec<String>,
}

/// One HTTP `Get` endpoint of an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationEndpoint {
    pub href: String,
    /// Allowed values of the `GetEncoding` constraint (`KVP`, `RESTful`).
    pub encodings: Vec<String>,
}

impl OperationEndpoint {
    /// KVP is assumed when the endpoint carries no encoding constraint.
    pub fn supports_kvp(&self) -> bool {
        self.encodings.is_empty() || self.encodings.iter().any(|e| e.eq_ignore_ascii_case("KVP"))
    }
}

/// Parse a WMTS capabilities XML document.
pub fn parse_capabilities(xml: &str) -> HydroResult<WmtsCapabilities> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut parser = CapabilitiesParser::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let (name, attrs) = element_parts(&e)?;
                parser.start(&name, &attrs)?;
                parser.path.push(name);
            }
            Ok(Event::Empty(e)) => {
                let (name, attrs) = element_parts(&e)?;
                parser.start(&name, &attrs)?;
                parser.end(&name)?;
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| {
                    HydroError::CapabilitiesParse(format!("bad text content: {}", e))
                })?;
                parser.text(text.trim());
            }
            Ok(Event::End(_)) => {
                if let Some(name) = parser.path.pop() {
                    parser.end(&name)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(HydroError::CapabilitiesParse(format!(
                    "XML parsing error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !parser.saw_root {
        return Err(HydroError::CapabilitiesParse(
            "document has no Capabilities root element".to_string(),
        ));
    }

    debug!(
        layers = parser.caps.layers.len(),
        matrix_sets = parser.caps.tile_matrix_sets.len(),
        "Parsed WMTS capabilities"
    );
    Ok(parser.caps)
}

type Attributes = Vec<(String, String)>;

fn element_parts(e: &BytesStart<'_>) -> HydroResult<(String, Attributes)> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr
            .map_err(|err| HydroError::CapabilitiesParse(format!("bad attribute on <{}>: {}", name, err)))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| HydroError::CapabilitiesParse(format!("bad attribute value: {}", err)))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok((name, attrs))
}

fn attr<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Raw text of a `TileMatrix`, converted when the element closes.
#[derive(Debug, Default)]
struct MatrixDraft {
    identifier: String,
    scale_denominator: String,
    top_left_corner: String,
    tile_width: String,
    tile_height: String,
    matrix_width: String,
    matrix_height: String,
}

impl MatrixDraft {
    fn build(self) -> HydroResult<TileMatrix> {
        let id = self.identifier;
        let corner: Vec<f64> = self
            .top_left_corner
            .split_whitespace()
            .map(|p| number(&id, "TopLeftCorner", p))
            .collect::<HydroResult<_>>()?;
        if corner.len() != 2 {
            return Err(HydroError::CapabilitiesParse(format!(
                "TileMatrix {}: TopLeftCorner needs two numbers",
                id
            )));
        }

        Ok(TileMatrix {
            scale_denominator: number(&id, "ScaleDenominator", &self.scale_denominator)?,
            top_left_corner: (corner[0], corner[1]),
            tile_width: number(&id, "TileWidth", &self.tile_width)?,
            tile_height: number(&id, "TileHeight", &self.tile_height)?,
            matrix_width: number(&id, "MatrixWidth", &self.matrix_width)?,
            matrix_height: number(&id, "MatrixHeight", &self.matrix_height)?,
            identifier: id,
        })
    }
}

fn number<T: std::str::FromStr>(matrix: &str, field: &str, raw: &str) -> HydroResult<T> {
    raw.trim().parse().map_err(|_| {
        HydroError::CapabilitiesParse(format!(
            "TileMatrix {}: invalid {} '{}'",
            matrix, field, raw
        ))
    })
}

fn corner(raw: &str) -> Option<(f64, f64)> {
    let mut parts = raw.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y))) => Some((x, y)),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct CapabilitiesParser {
    caps: WmtsCapabilities,
    /// Open elements, outermost first, excluding one being started.
    path: Vec<String>,
    saw_root: bool,
    layer: Option<WmtsLayer>,
    style: Option<WmtsStyle>,
    dimension: Option<WmtsDimension>,
    matrix_set: Option<TileMatrixSet>,
    matrix: Option<MatrixDraft>,
    lower_corner: Option<(f64, f64)>,
    operation: Option<String>,
    endpoint: Option<OperationEndpoint>,
}

impl CapabilitiesParser {
    fn parent(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    fn grandparent(&self) -> Option<&str> {
        self.path
            .len()
            .checked_sub(2)
            .map(|i| self.path[i].as_str())
    }

    fn start(&mut self, name: &str, attrs: &Attributes) -> HydroResult<()> {
        if self.path.is_empty() {
            if name != "Capabilities" {
                return Err(HydroError::CapabilitiesParse(format!(
                    "expected <Capabilities> root, found <{}>",
                    name
                )));
            }
            self.saw_root = true;
            return Ok(());
        }

        let parent = self.parent().map(str::to_string);
        let parent = parent.as_deref();
        match name {
            "Layer" if parent == Some("Contents") => self.layer = Some(WmtsLayer::default()),
            "Style" if self.layer.is_some() => {
                self.style = Some(WmtsStyle {
                    identifier: String::new(),
                    is_default: attr(attrs, "isDefault") == Some("true"),
                })
            }
            "Dimension" if self.layer.is_some() => self.dimension = Some(WmtsDimension::default()),
            "ResourceURL" => {
                if let (Some(layer), Some(template)) = (self.layer.as_mut(), attr(attrs, "template")) {
                    layer.resource_urls.push(ResourceUrl {
                        format: attr(attrs, "format").map(str::to_string),
                        resource_type: attr(attrs, "resourceType").unwrap_or("tile").to_string(),
                        template: template.to_string(),
                    });
                }
            }
            "TileMatrixSet" if parent == Some("Contents") => {
                self.matrix_set = Some(TileMatrixSet::default())
            }
            "TileMatrix" if self.matrix_set.is_some() && parent == Some("TileMatrixSet") => {
                self.matrix = Some(MatrixDraft::default())
            }
            "Operation" => self.operation = attr(attrs, "name").map(str::to_string),
            "Get" if self.operation.as_deref() == Some("GetTile") => {
                self.endpoint = Some(OperationEndpoint {
                    href: attr(attrs, "href").unwrap_or_default().to_string(),
                    encodings: Vec::new(),
                })
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let (current, parent) = match (self.parent(), self.grandparent()) {
            (Some(c), Some(p)) => (c.to_string(), p.to_string()),
            _ => return,
        };
        let value = text.to_string();

        if let Some(matrix) = self.matrix.as_mut() {
            if parent == "TileMatrix" {
                match current.as_str() {
                    "Identifier" => matrix.identifier = value,
                    "ScaleDenominator" => matrix.scale_denominator = value,
                    "TopLeftCorner" => matrix.top_left_corner = value,
                    "TileWidth" => matrix.tile_width = value,
                    "TileHeight" => matrix.tile_height = value,
                    "MatrixWidth" => matrix.matrix_width = value,
                    "MatrixHeight" => matrix.matrix_height = value,
                    _ => {}
                }
            }
            return;
        }

        if let Some(set) = self.matrix_set.as_mut() {
            if parent == "TileMatrixSet" {
                match current.as_str() {
                    "Identifier" => set.identifier = value,
                    "SupportedCRS" => set.supported_crs = Some(value),
                    "WellKnownScaleSet" => set.well_known_scale_set = Some(value),
                    _ => {}
                }
            }
            return;
        }

        if let Some(dimension) = self.dimension.as_mut() {
            if parent == "Dimension" {
                match current.as_str() {
                    "Identifier" => dimension.identifier = value,
                    "Default" => dimension.default = Some(value),
                    "Value" => dimension.values.push(value),
                    _ => {}
                }
            }
            return;
        }

        if let Some(style) = self.style.as_mut() {
            if parent == "Style" && current == "Identifier" {
                style.identifier = value;
            }
            return;
        }

        if let Some(layer) = self.layer.as_mut() {
            match (parent.as_str(), current.as_str()) {
                ("Layer", "Identifier") => layer.identifier = value,
                ("Layer", "Title") => layer.title = Some(value),
                ("Layer", "Abstract") => layer.abstract_text = Some(value),
                ("Layer", "Format") => layer.formats.push(value),
                ("TileMatrixSetLink", "TileMatrixSet") => layer.tile_matrix_set_links.push(value),
                ("WGS84BoundingBox", "LowerCorner") => self.lower_corner = corner(&value),
                ("WGS84BoundingBox", "UpperCorner") => {
                    if let (Some((min_x, min_y)), Some((max_x, max_y))) =
                        (self.lower_corner, corner(&value))
                    {
                        layer.wgs84_bounding_box = Some(BoundingBox::new(min_x, min_y, max_x, max_y));
                    }
                }
                _ => {}
            }
            return;
        }

        if let Some(endpoint) = self.endpoint.as_mut() {
            if current == "Value" && parent == "AllowedValues" {
                endpoint.encodings.push(value);
            }
        }
    }

    fn end(&mut self, name: &str) -> HydroResult<()> {
        match name {
            "TileMatrix" if self.matrix.is_some() => {
                if let (Some(draft), Some(set)) = (self.matrix.take(), self.matrix_set.as_mut()) {
                    set.tile_matrices.push(draft.build()?);
                }
            }
            "TileMatrixSet" if self.matrix_set.is_some() && self.parent() == Some("Contents") => {
                if let Some(set) = self.matrix_set.take() {
                    self.caps.tile_matrix_sets.push(set);
                }
            }
            "Style" => {
                if let (Some(style), Some(layer)) = (self.style.take(), self.layer.as_mut()) {
                    layer.styles.push(style);
                }
            }
            "Dimension" => {
                if let (Some(dimension), Some(layer)) = (self.dimension.take(), self.layer.as_mut()) {
                    layer.dimensions.push(dimension);
                }
            }
            "Layer" if self.parent() == Some("Contents") => {
                if let Some(layer) = self.layer.take() {
                    if layer.identifier.is_empty() {
                        warn!("Skipping WMTS layer without identifier");
                    } else {
                        self.caps.layers.push(layer);
                    }
                }
                self.lower_corner = None;
            }
            "Get" => {
                if let Some(endpoint) = self.endpoint.take() {
                    if !endpoint.href.is_empty() {
                        self.caps.get_tile_endpoints.push(endpoint);
                    }
                }
            }
            "Operation" => self.operation = None,
            _ => {}
        }
        Ok(())
    }
}
