// Texture memory accounting.
// Every image the demo creates (the composite buffer and each tile) is
// charged here first, so running out of graphics memory is an ordinary
// `Error::TextureAlloc` instead of an abort.

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureMemory {
    /// Bytes still available; `None` means the backend sets no limit.
    remaining: Option<usize>,
    used: usize,
}

impl TextureMemory {
    pub fn unbounded() -> Self {
        Self { remaining: None, used: 0 }
    }

    pub fn with_budget(bytes: usize) -> Self {
        Self { remaining: Some(bytes), used: 0 }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Charge `width * height * elems_per_pixel` elements of `T` and hand back
    /// an empty vector with exactly that capacity reserved.
    /// `T` is the storage element (u8 for RGBA images, u32 for packed pixels).
    pub fn allocate<T>(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        elems_per_pixel: usize,
    ) -> Result<Vec<T>, Error> {
        let elems = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(elems_per_pixel))
            .ok_or_else(|| Error::TextureAlloc(format!("{label}: {width}x{height} overflows")))?;
        let bytes = elems
            .checked_mul(size_of::<T>())
            .ok_or_else(|| Error::TextureAlloc(format!("{label}: {width}x{height} overflows")))?;

        if let Some(left) = self.remaining {
            if bytes > left {
                return Err(Error::TextureAlloc(format!(
                    "{label}: {width}x{height} needs {bytes} bytes, {left} left"
                )));
            }
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(elems)
            .map_err(|e| Error::TextureAlloc(format!("{label}: {e}")))?;

        if let Some(left) = self.remaining.as_mut() {
            *left -= bytes;
        }
        self.used += bytes;
        Ok(storage)
    }
}
