use eyre::bail;
use eyre::ensure;

/// Row pitch alignment required for buffer to texture copies
/// (`D3D12_TEXTURE_DATA_PITCH_ALIGNMENT`).
pub const TEXTURE_DATA_PITCH_ALIGNMENT: u32 = 256;

pub const BYTES_PER_PIXEL: u32 = 4;

/// Rounds `value` up to a multiple of `alignment`, which must be a power of two.
pub fn align_up(value: u32, alignment: u32) -> u32 {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// A tightly packed `R8G8B8A8_UNORM` image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rgba8Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Rgba8Image {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> eyre::Result<Self> {
        ensure!(width > 0 && height > 0, "image must not be empty ({width}x{height})");
        let expected = width as usize * height as usize * BYTES_PER_PIXEL as usize;
        if pixels.len() != expected {
            bail!(
                "{width}x{height} image needs {expected} bytes, got {}",
                pixels.len()
            );
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Red and blue texels on the diagonals.
    pub fn checker_2x2() -> Self {
        #[rustfmt::skip]
        let pixels = vec![
            255, 0, 0, 255,   0, 0, 255, 255,
            0, 0, 255, 255,   255, 0, 0, 255,
        ];
        Self {
            width: 2,
            height: 2,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL as usize
    }

    /// Copies every row into `dst`, starting each one `dst_row_pitch` bytes after
    /// the previous. Bytes between rows are left untouched.
    pub fn copy_into_pitched(&self, dst: &mut [u8], dst_row_pitch: usize) -> eyre::Result<()> {
        let row_bytes = self.row_bytes();
        ensure!(
            dst_row_pitch >= row_bytes,
            "row pitch {dst_row_pitch} is smaller than a row of {row_bytes} bytes"
        );
        let needed = dst_row_pitch * (self.height as usize - 1) + row_bytes;
        ensure!(
            dst.len() >= needed,
            "destination holds {} bytes, {needed} needed",
            dst.len()
        );

        for (row, src) in self.pixels.chunks_exact(row_bytes).enumerate() {
            let start = row * dst_row_pitch;
            dst[start..start + row_bytes].copy_from_slice(src);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_the_next_multiple() {
        assert_eq!(align_up(0, 256), 0);
        assert_eq!(align_up(8, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
    }

    #[test]
    fn new_checks_the_buffer_length() {
        assert!(Rgba8Image::new(2, 2, vec![0; 16]).is_ok());
        assert!(Rgba8Image::new(2, 2, vec![0; 15]).is_err());
        assert!(Rgba8Image::new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn checker_alternates_red_and_blue() {
        let image = Rgba8Image::checker_2x2();
        let texels: Vec<&[u8]> = image.pixels().chunks(4).collect();
        let red: &[u8] = &[255, 0, 0, 255];
        let blue: &[u8] = &[0, 0, 255, 255];
        assert_eq!(texels, [red, blue, blue, red]);
        assert_eq!(image.row_bytes(), 8);
    }

    #[test]
    fn rows_land_at_the_pitch() {
        let image = Rgba8Image::checker_2x2();
        let pitch = align_up(image.row_bytes() as u32, TEXTURE_DATA_PITCH_ALIGNMENT) as usize;
        let mut upload = vec![0xAA; pitch * 2];
        image.copy_into_pitched(&mut upload, pitch).unwrap();

        assert_eq!(&upload[..8], &image.pixels()[..8]);
        assert!(upload[8..pitch].iter().all(|&b| b == 0xAA));
        assert_eq!(&upload[pitch..pitch + 8], &image.pixels()[8..]);
    }

    #[test]
    fn copy_rejects_short_destinations() {
        let image = Rgba8Image::checker_2x2();
        assert!(image.copy_into_pitched(&mut [0; 64], 4).is_err());
        // Last row needs only `row_bytes`, not a full pitch.
        assert!(image.copy_into_pitched(&mut [0; 264], 256).is_ok());
        assert!(image.copy_into_pitched(&mut [0; 263], 256).is_err());
    }
}
