/// Failures at the input boundary.
///
/// Geometry and animation are total functions over numbers and never
/// produce one of these; only decoding inputs and crossing the JNI
/// boundary can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("route plan JSON error: {0}")]
    RoutePlan(#[source] serde_json::Error),

    #[error("GPX parse error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("config JSON error: {0}")]
    Config(#[source] serde_json::Error),

    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
