/// Auth guard: password hashing, token issuance/verification and the
/// ownership policy applied by every guarded mutation.
pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{decode_token, sign_token, Claims, Identity};
pub use password::{hash_password, verify_password};
pub use policy::ensure_owner;
