//! `.netrc` secrets file adapter.

mod parser;
mod source;

pub use parser::{Netrc, NetrcEntry, NetrcParseError};
pub use source::{NETRC_OVERRIDE_ENV, NetrcCredentialSource};
