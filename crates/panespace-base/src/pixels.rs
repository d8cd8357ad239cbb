/// Byte order of one 4-byte pixel as delivered by a capture source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelOrder {
    Bgra,
    Rgba,
}

/// Flat row-major pixel data, four bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    order: PixelOrder,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps `data`, rejecting buffers whose length does not match `width * height * 4`.
    pub fn new(width: u32, height: u32, order: PixelOrder, data: Vec<u8>) -> crate::Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(crate::Error::InvalidParameter(format!(
                "pixel buffer of {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> PixelOrder {
        self.order
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Converts to RGBA order in place, swapping bytes 0 and 2 of each pixel if needed.
    pub fn into_rgba(mut self) -> Self {
        if self.order == PixelOrder::Bgra {
            swap_red_blue(&mut self.data);
            self.order = PixelOrder::Rgba;
        }
        self
    }
}

pub fn swap_red_blue(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
}
