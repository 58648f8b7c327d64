use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub base: u32,
    pub bytes: Vec<u8>,
    pub perms: &'static str, // e.g., "r-x"
    pub kind: &'static str,  // e.g., "raw"
}

impl Segment {
    /// Exclusive end; reaches `1 << 32` for a segment ending at the top of memory.
    pub fn end(&self) -> u64 {
        u64::from(self.base) + self.bytes.len() as u64
    }

    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.base && ((addr - self.base) as usize) < self.bytes.len()
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    pub segments: Vec<Segment>,
}

impl Image {
    /// Single raw segment at `base`, used for literal words and tests.
    pub fn from_bytes(base: u32, bytes: Vec<u8>) -> Self {
        let seg = Segment { name: "segment0".into(), base, bytes, perms: "r-x", kind: "raw" };
        Self { segments: vec![seg] }
    }

    pub fn first_base(&self) -> Option<u32> {
        self.segments.first().map(|s| s.base)
    }

    pub fn last_end(&self) -> Option<u64> {
        self.segments.iter().map(Segment::end).max()
    }
}

pub fn load_raw_bin(path: &Path, base: u32, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    anyhow::ensure!(
        (base as u64) + (payload.len() as u64) <= 1u64 << 32,
        "image does not fit in the 32-bit address space"
    );
    Ok(Image::from_bytes(base, payload.to_vec()))
}

pub fn read_u8(img: &Image, addr: u32) -> Option<u8> {
    img.segments
        .iter()
        .find(|s| s.contains(addr))
        .map(|s| s.bytes[(addr - s.base) as usize])
}

/// Little-endian instruction word at `addr`; all four bytes must be mapped.
pub fn read_u32(img: &Image, addr: u32) -> Option<u32> {
    let b0 = read_u8(img, addr)?;
    let b1 = read_u8(img, addr.wrapping_add(1))?;
    let b2 = read_u8(img, addr.wrapping_add(2))?;
    let b3 = read_u8(img, addr.wrapping_add(3))?;
    Some(u32::from_le_bytes([b0, b1, b2, b3]))
}

pub fn is_mapped(img: &Image, addr: u32) -> bool {
    img.segments.iter().any(|s| s.contains(addr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_maps_skip_and_len() {
        let name = format!("rv32_disasm_model_{}.bin", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
        let img = load_raw_bin(&path, 0x1000_0000, 2, Some(3)).unwrap();
        assert_eq!(img.segments.len(), 1);
        let s = &img.segments[0];
        assert_eq!(s.base, 0x1000_0000);
        assert_eq!(s.bytes, vec![2, 3, 4]);
        assert!(read_u32(&img, 0x1000_0000).is_none());
        assert_eq!(read_u8(&img, 0x1000_0002), Some(4));
        assert!(load_raw_bin(&path, 0, 7, None).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn words_are_little_endian() {
        let img = Image::from_bytes(0x8000_0000, vec![0x13, 0x00, 0x00, 0x00, 0x73]);
        assert_eq!(read_u32(&img, 0x8000_0000), Some(0x13));
        assert!(read_u32(&img, 0x8000_0004).is_none());
        assert!(is_mapped(&img, 0x8000_0004));
        assert!(!is_mapped(&img, 0x8000_0005));
        assert_eq!(img.last_end(), Some(0x8000_0005));
    }

    #[test]
    fn image_may_end_at_the_top_of_memory() {
        let name = format!("rv32_disasm_top_{}.bin", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, [0x13u8, 0, 0, 0, 0x73]).unwrap();
        let img = load_raw_bin(&path, 0xFFFF_FFFC, 0, Some(4)).unwrap();
        assert_eq!(img.last_end(), Some(1 << 32));
        assert_eq!(read_u32(&img, 0xFFFF_FFFC), Some(0x13));
        assert!(load_raw_bin(&path, 0xFFFF_FFFC, 0, None).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
