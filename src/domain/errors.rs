use derive_more::Display;

/// Top-level error, one variant per layer.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Domain Error: {}", _0)]
    Domain(DomainError),
    #[display(fmt = "Infrastructure Error: {}", _0)]
    Infrastructure(InfrastructureError),
    #[display(fmt = "Configuration Error: {}", _0)]
    Config(String),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum DomainError {
    #[display(fmt = "risk-reward ratio must be finite and positive, got {}", _0)]
    InvalidRiskReward(f64),
    #[display(fmt = "candle {} is not strictly after its predecessor", index)]
    UnorderedCandles { index: usize },
    #[display(fmt = "candle {} has inconsistent OHLC values", index)]
    InvalidCandle { index: usize },
    #[display(fmt = "{}", _0)]
    Mapping(MappingError),
}

/// Reasons a pixel/domain conversion is refused.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum MappingError {
    #[display(fmt = "x={:.1} is outside the visible time range", x)]
    OutsideTimeRange { x: f64 },
    #[display(fmt = "y={:.1} is outside the price area", y)]
    OutsidePriceArea { y: f64 },
    #[display(fmt = "time {} is not part of the loaded series", _0)]
    UnknownTime(u64),
    #[display(fmt = "projection is degenerate")]
    DegenerateProjection,
    #[display(fmt = "no candles loaded")]
    NoData,
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum InfrastructureError {
    #[display(fmt = "request failed: {}", _0)]
    Network(String),
    #[display(fmt = "HTTP error: {}", status)]
    Http { status: u16 },
    #[display(fmt = "failed to parse response: {}", _0)]
    Parse(String),
    #[display(fmt = "empty result: {}", _0)]
    EmptyResult(&'static str),
    #[display(fmt = "rendering failed: {}", _0)]
    Rendering(String),
    #[display(fmt = "browser API unavailable: {}", _0)]
    BrowserApi(String),
}

impl std::error::Error for AppError {}
impl std::error::Error for DomainError {}
impl std::error::Error for MappingError {}
impl std::error::Error for InfrastructureError {}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        AppError::Domain(error)
    }
}

impl From<InfrastructureError> for AppError {
    fn from(error: InfrastructureError) -> Self {
        AppError::Infrastructure(error)
    }
}

impl From<MappingError> for DomainError {
    fn from(error: MappingError) -> Self {
        DomainError::Mapping(error)
    }
}

impl From<DomainError> for InfrastructureError {
    fn from(error: DomainError) -> Self {
        InfrastructureError::Parse(error.to_string())
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(error: serde_json::Error) -> Self {
        InfrastructureError::Parse(error.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
