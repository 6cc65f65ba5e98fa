//! Stop planning error types.

/// Error from stop planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// No candidate stations were supplied.
    #[error("no fuel stations available")]
    NoStations,

    /// A threshold crossing found no station and the gap policy is `Fail`.
    #[error("no fuel station in range at mile {mile}")]
    NoStationInRange { mile: f64 },
}
