use crate::error::{Result, ShellError};

/// Grow `buf` so it can hold `increment` more elements than it currently stores.
///
/// Both the line reader and the tokenizer extend their storage in fixed steps instead of
/// relying on `Vec`'s amortized doubling; a failed reservation becomes
/// [`ShellError::Allocation`] rather than an abort.
pub(crate) fn grow<T>(buf: &mut Vec<T>, increment: usize, what: &'static str) -> Result<()> {
    buf.try_reserve_exact(increment)
        .map_err(|source| ShellError::Allocation { what, source })?;
    log::trace!("grew {} to {} slots", what, buf.capacity());
    Ok(())
}
