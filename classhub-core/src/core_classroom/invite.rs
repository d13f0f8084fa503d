//! Invite-code generation for classrooms

/// Length of generated invite codes
pub const CODE_LEN: usize = 8;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random invite code.
///
/// Codes are drawn from a 36^8 namespace; uniqueness is ultimately enforced
/// by the store's UNIQUE constraint, with callers retrying on collision.
pub fn generate_invite_code() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
