pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use claims::TOKEN_TTL_HOURS;
pub use codec::TokenCodec;
pub use errors::TokenError;
