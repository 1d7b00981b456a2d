//! Lightweight 8-bit grayscale image containers.
//!
//! Pixels are stored row-major with no stride padding; `data.len()` is always
//! `width * height`.

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl GrayImageView<'_> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Copy the `w x h` window whose top-left corner is `(x0, y0)`.
    ///
    /// The window must lie inside the image.
    pub fn sub_image(&self, x0: usize, y0: usize, w: usize, h: usize) -> GrayImage {
        debug_assert!(x0 + w <= self.width && y0 + h <= self.height);
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y0 + h {
            data.extend_from_slice(&self.row(y)[x0..x0 + w]);
        }
        GrayImage {
            width: w,
            height: h,
            data,
        }
    }

    pub fn to_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Allocate a `width x height` image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing buffer. Returns `None` when the length does not match.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (width.checked_mul(height)? == data.len()).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of pixels exactly equal to `value`.
    pub fn count_value(&self, value: u8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Copy the `w x h` window whose top-left corner is `(x0, y0)`.
    pub fn sub_image(&self, x0: usize, y0: usize, w: usize, h: usize) -> GrayImage {
        self.view().sub_image(x0, y0, w, h)
    }

    /// Paste `src` with its top-left corner at `(x0, y0)`, clipping at the borders.
    pub fn paste(&mut self, src: &GrayImageView<'_>, x0: usize, y0: usize) {
        if x0 >= self.width || y0 >= self.height {
            return;
        }
        let w = src.width.min(self.width - x0);
        let h = src.height.min(self.height - y0);
        for y in 0..h {
            let dst = (y0 + y) * self.width + x0;
            self.data[dst..dst + w].copy_from_slice(&src.row(y)[..w]);
        }
    }
}
