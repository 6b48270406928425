use rand::Rng;

use super::domain::ReceiptId;

/// Length of every issued identifier.
pub const RECEIPT_ID_LENGTH: usize = 32;

const RECEIPT_ID_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-";

/// Issue a fresh identifier using the thread-local RNG.
///
/// When `is_taken` reports the first candidate as used, exactly one replacement is generated
/// and returned without checking it again. Uniqueness is therefore only probable; callers rely
/// on the repository refusing duplicate inserts.
pub fn issue<F>(is_taken: F) -> ReceiptId
where
    F: Fn(&ReceiptId) -> bool,
{
    issue_with_rng(&mut rand::thread_rng(), is_taken)
}

/// Same as [`issue`] with a caller supplied RNG, so generation can be seeded.
pub fn issue_with_rng<R, F>(rng: &mut R, is_taken: F) -> ReceiptId
where
    R: Rng + ?Sized,
    F: Fn(&ReceiptId) -> bool,
{
    let candidate = random_id(rng);
    if is_taken(&candidate) {
        return random_id(rng);
    }
    candidate
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> ReceiptId {
    let mut out = String::with_capacity(RECEIPT_ID_LENGTH);
    for _ in 0..RECEIPT_ID_LENGTH {
        let idx = rng.gen_range(0..RECEIPT_ID_ALPHABET.len());
        out.push(RECEIPT_ID_ALPHABET[idx] as char);
    }
    ReceiptId(out)
}
