// put custom headers to here
// lower case, so they can be used with `HeaderName::from_static`

pub const REQUEST_ID: &str = "request-id";
pub const X_REQUEST_ID: &str = "x-request-id";
