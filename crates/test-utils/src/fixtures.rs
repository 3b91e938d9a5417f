//! Common test fixtures for the viewer tests.
//!
//! Capabilities documents are trimmed-down versions of what a Copernicus
//! Marine style WMTS endpoint returns: three layers listed so that the
//! global (region-less) VHM0 layer comes before the Baltic one.

/// Identifier of the global temperature layer in [`CAPABILITIES_KVP`].
pub const GLOBAL_THETAO_LAYER: &str =
    "GLOBAL_ANALYSISFORECAST_PHY_001_024/cmems_mod_glo_phy-thetao_anfc_0.083deg_PT6H-i_202406/thetao";

/// Identifier of the global wave layer in [`CAPABILITIES_KVP`].
pub const GLOBAL_VHM0_LAYER: &str =
    "GLOBAL_ANALYSISFORECAST_WAV_001_027/cmems_mod_glo_wav_anfc_0.083deg_PT3H-i_202411/VHM0";

/// Identifier of the Baltic wave layer in [`CAPABILITIES_KVP`].
pub const BALTIC_VHM0_LAYER: &str =
    "BALTICSEA_ANALYSISFORECAST_WAV_003_010/cmems_mod_bal_wav_anfc_PT1H-i_202311/VHM0";

/// Capabilities advertising a KVP GetTile endpoint.
pub const CAPABILITIES_KVP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Capabilities xmlns="http://www.opengis.net/wmts/1.0" xmlns:ows="http://www.opengis.net/ows/1.1" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.0.0">
  <ows:ServiceIdentification>
    <ows:Title>Copernicus Marine WMTS</ows:Title>
    <ows:ServiceType>OGC WMTS</ows:ServiceType>
    <ows:ServiceTypeVersion>1.0.0</ows:ServiceTypeVersion>
  </ows:ServiceIdentification>
  <ows:OperationsMetadata>
    <ows:Operation name="GetCapabilities">
      <ows:DCP><ows:HTTP><ows:Get xlink:href="https://wmts.marine.copernicus.eu/teroWmts?"/></ows:HTTP></ows:DCP>
    </ows:Operation>
    <ows:Operation name="GetTile">
      <ows:DCP>
        <ows:HTTP>
          <ows:Get xlink:href="https://wmts.marine.copernicus.eu/teroWmts?">
            <ows:Constraint name="GetEncoding">
              <ows:AllowedValues><ows:Value>KVP</ows:Value></ows:AllowedValues>
            </ows:Constraint>
          </ows:Get>
        </ows:HTTP>
      </ows:DCP>
    </ows:Operation>
  </ows:OperationsMetadata>
  <Contents>
    <Layer>
      <ows:Title>Global Ocean Physics Analysis and Forecast - thetao</ows:Title>
      <ows:Abstract>Sea water potential temperature</ows:Abstract>
      <ows:WGS84BoundingBox>
        <ows:LowerCorner>-180 -80</ows:LowerCorner>
        <ows:UpperCorner>179.92 90</ows:UpperCorner>
      </ows:WGS84BoundingBox>
      <ows:Identifier>GLOBAL_ANALYSISFORECAST_PHY_001_024/cmems_mod_glo_phy-thetao_anfc_0.083deg_PT6H-i_202406/thetao</ows:Identifier>
      <Style isDefault="true"><ows:Identifier>cmap:thermal</ows:Identifier></Style>
      <Format>image/png</Format>
      <TileMatrixSetLink><TileMatrixSet>EPSG:3857</TileMatrixSet></TileMatrixSetLink>
      <Dimension>
        <ows:Identifier>time</ows:Identifier>
        <Default>2024-06-01T00:00:00Z</Default>
        <Value>2024-05-31T00:00:00Z/2024-06-01T00:00:00Z/PT6H</Value>
      </Dimension>
    </Layer>
    <Layer>
      <ows:Title>Global Ocean Waves Analysis and Forecast - VHM0</ows:Title>
      <ows:Abstract>Spectral significant wave height</ows:Abstract>
      <ows:Identifier>GLOBAL_ANALYSISFORECAST_WAV_001_027/cmems_mod_glo_wav_anfc_0.083deg_PT3H-i_202411/VHM0</ows:Identifier>
      <Style><ows:Identifier>cmap:amp</ows:Identifier></Style>
      <Format>image/jpeg</Format>
      <Format>image/png</Format>
      <TileMatrixSetLink><TileMatrixSet>EPSG:3857</TileMatrixSet></TileMatrixSetLink>
    </Layer>
    <Layer>
      <ows:Title>Wave Analysis and Forecast - VHM0</ows:Title>
      <ows:Abstract>Baltic Sea significant wave height from the WAM model</ows:Abstract>
      <ows:Identifier>BALTICSEA_ANALYSISFORECAST_WAV_003_010/cmems_mod_bal_wav_anfc_PT1H-i_202311/VHM0</ows:Identifier>
      <Style><ows:Identifier>cmap:amp</ows:Identifier></Style>
      <Style isDefault="true"><ows:Identifier>cmap:ice</ows:Identifier></Style>
      <Format>image/png</Format>
      <TileMatrixSetLink><TileMatrixSet>EPSG:3857</TileMatrixSet></TileMatrixSetLink>
      <TileMatrixSetLink><TileMatrixSet>EPSG:4326</TileMatrixSet></TileMatrixSetLink>
      <Dimension>
        <ows:Identifier>time</ows:Identifier>
        <Default>2024-06-01T12:00:00Z</Default>
      </Dimension>
    </Layer>
    <TileMatrixSet>
      <ows:Identifier>EPSG:4326</ows:Identifier>
      <ows:SupportedCRS>urn:ogc:def:crs:EPSG::4326</ows:SupportedCRS>
      <TileMatrix>
        <ows:Identifier>0</ows:Identifier>
        <ScaleDenominator>279541132.0143589</ScaleDenominator>
        <TopLeftCorner>-180 90</TopLeftCorner>
        <TileWidth>256</TileWidth>
        <TileHeight>256</TileHeight>
        <MatrixWidth>2</MatrixWidth>
        <MatrixHeight>1</MatrixHeight>
      </TileMatrix>
    </TileMatrixSet>
    <TileMatrixSet>
      <ows:Identifier>EPSG:3857</ows:Identifier>
      <ows:SupportedCRS>urn:ogc:def:crs:EPSG::3857</ows:SupportedCRS>
      <TileMatrix>
        <ows:Identifier>0</ows:Identifier>
        <ScaleDenominator>559082264.0287178</ScaleDenominator>
        <TopLeftCorner>-20037508.342789244 20037508.342789244</TopLeftCorner>
        <TileWidth>256</TileWidth>
        <TileHeight>256</TileHeight>
        <MatrixWidth>1</MatrixWidth>
        <MatrixHeight>1</MatrixHeight>
      </TileMatrix>
      <TileMatrix>
        <ows:Identifier>1</ows:Identifier>
        <ScaleDenominator>279541132.0143589</ScaleDenominator>
        <TopLeftCorner>-20037508.342789244 20037508.342789244</TopLeftCorner>
        <TileWidth>256</TileWidth>
        <TileHeight>256</TileHeight>
        <MatrixWidth>2</MatrixWidth>
        <MatrixHeight>2</MatrixHeight>
      </TileMatrix>
      <TileMatrix>
        <ows:Identifier>5</ows:Identifier>
        <ScaleDenominator>17471320.75089743</ScaleDenominator>
        <TopLeftCorner>-20037508.342789244 20037508.342789244</TopLeftCorner>
        <TileWidth>256</TileWidth>
        <TileHeight>256</TileHeight>
        <MatrixWidth>32</MatrixWidth>
        <MatrixHeight>32</MatrixHeight>
      </TileMatrix>
    </TileMatrixSet>
  </Contents>
</Capabilities>
"#;

/// Capabilities with only RESTful resource URLs and no OperationsMetadata.
pub const CAPABILITIES_REST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Capabilities xmlns="http://www.opengis.net/wmts/1.0" xmlns:ows="http://www.opengis.net/ows/1.1" version="1.0.0">
  <Contents>
    <Layer>
      <ows:Title>Black Sea Physics - thetao</ows:Title>
      <ows:Identifier>BLKSEA_ANALYSISFORECAST_PHY_007_001/thetao</ows:Identifier>
      <Style isDefault="true"><ows:Identifier>default</ows:Identifier></Style>
      <Format>image/png</Format>
      <ResourceURL format="image/webp" resourceType="tile" template="https://tiles.example.org/rest/thetao/{Style}/{TileMatrixSet}/{TileMatrix}/{TileRow}/{TileCol}.webp"/>
      <ResourceURL format="image/png" resourceType="tile" template="https://tiles.example.org/rest/thetao/{Style}/{TileMatrixSet}/{TileMatrix}/{TileRow}/{TileCol}.png"/>
      <ResourceURL format="application/json" resourceType="FeatureInfo" template="https://tiles.example.org/rest/thetao/{TileMatrixSet}/{TileMatrix}/{TileRow}/{TileCol}/{J}/{I}.json"/>
    </Layer>
    <TileMatrixSet>
      <ows:Identifier>WebMercatorQuad</ows:Identifier>
      <ows:SupportedCRS>urn:ogc:def:crs:EPSG::3857</ows:SupportedCRS>
      <TileMatrix>
        <ows:Identifier>0</ows:Identifier>
        <ScaleDenominator>559082264.0287178</ScaleDenominator>
        <TopLeftCorner>-20037508.342789244 20037508.342789244</TopLeftCorner>
        <TileWidth>256</TileWidth>
        <TileHeight>256</TileHeight>
        <MatrixWidth>1</MatrixWidth>
        <MatrixHeight>1</MatrixHeight>
      </TileMatrix>
    </TileMatrixSet>
  </Contents>
</Capabilities>
"#;

/// A layer without styles, formats or matrix set links.
pub const CAPABILITIES_BARE_LAYER: &str = r#"<Capabilities xmlns="http://www.opengis.net/wmts/1.0" xmlns:ows="http://www.opengis.net/ows/1.1">
  <Contents>
    <Layer>
      <ows:Identifier>sea_ice/siconc</ows:Identifier>
      <ResourceURL resourceType="tile" template="https://tiles.example.org/{TileMatrix}/{TileRow}/{TileCol}"/>
    </Layer>
    <TileMatrixSet>
      <ows:Identifier>Arctic3413</ows:Identifier>
      <ows:SupportedCRS>urn:ogc:def:crs:EPSG::3413</ows:SupportedCRS>
    </TileMatrixSet>
  </Contents>
</Capabilities>
"#;

/// Capabilities with no layers at all.
pub const CAPABILITIES_EMPTY: &str = r#"<Capabilities xmlns="http://www.opengis.net/wmts/1.0" xmlns:ows="http://www.opengis.net/ows/1.1">
  <Contents>
    <TileMatrixSet>
      <ows:Identifier>EPSG:3857</ows:Identifier>
    </TileMatrixSet>
  </Contents>
</Capabilities>
"#;

/// `/health` body as the backend sends it (JSON served as text/plain).
pub const HEALTH_BODY: &str = r#"{"wmts": "https://wmts.marine.copernicus.eu/teroWmts", "datasets": {"waves": "cmems_mod_bal_wav_anfc_PT1H-i", "physics": "cmems_mod_bal_phy_anfc_PT15M-i", "ice": "cmems_mod_bal_phy_anfc_PT15M-i"}, "cm_user": true}"#;
