//! Best-effort erasure of sensitive buffers.
//!
//! Zeroing only reaches the buffer it is given. Copies the allocator or
//! the caller made earlier (reallocation, clones, terminal buffers) are
//! out of reach, so this narrows the window secrets linger in memory
//! rather than closing it.
//!
//! For wipes that must also happen on error and panic paths, hold the
//! data in `zeroize::Zeroizing` (or a `ZeroizeOnDrop` type) so the wipe
//! runs from `Drop`.

use zeroize::Zeroize;

/// Overwrite every byte of `buffer` with zero.
///
/// The write goes through `zeroize`, so the compiler cannot elide it.
pub fn secure_wipe(buffer: &mut [u8]) {
    buffer.zeroize();
}

/// Zero a string's contents and leave it empty.
pub fn secure_wipe_string(value: &mut String) {
    value.zeroize();
}
