use serde::Deserialize;

/// Query parameters accepted by the search route.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Pipe-delimited engine flag names.
    pub flags: Option<String>,
    /// Named search profile.
    pub profile: Option<String>,
}

/// Response-shaping switches.
///
/// Both observed deployments of this service exist: one returns the engine
/// payload verbatim and maps failure kinds to statuses, the other echoes the
/// request back in an envelope and reports every failure as 500. The defaults
/// select the first variant.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Wrap successful responses in a `{request, response}` envelope instead
    /// of passing the engine payload through verbatim.
    pub echo_request: bool,
    /// Map engine failures through the status table; when disabled every
    /// failure reports 500.
    pub map_error_status: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            echo_request: false,
            map_error_status: true,
        }
    }
}
