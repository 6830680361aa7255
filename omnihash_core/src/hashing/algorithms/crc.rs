//! CRC checksums following the crcmod predefined catalogue
//!
//! Models come from the `crc` crate catalogue, except the two 64-bit
//! models crcmod defines that the catalogue has no entry for.

use crate::hashing::traits::{Digester, DigesterFactory, DigesterKind};
use crc::{Algorithm, Crc};

/// crcmod `crc-64`: reflected ISO polynomial, zero init and xorout
const CRC_64_CRCMOD: Algorithm<u64> = Algorithm {
    width: 64,
    poly: 0x0000_0000_0000_001b,
    init: 0x0000_0000_0000_0000,
    refin: true,
    refout: true,
    xorout: 0x0000_0000_0000_0000,
    check: 0x46a5_a938_8a5b_effe,
    residue: 0x0000_0000_0000_0000,
};

/// crcmod `crc-64-jones`
const CRC_64_JONES: Algorithm<u64> = Algorithm {
    width: 64,
    poly: 0xad93_d235_94c9_35a9,
    init: 0xffff_ffff_ffff_ffff,
    refin: true,
    refout: true,
    xorout: 0x0000_0000_0000_0000,
    check: 0xcaa7_1716_8609_f281,
    residue: 0x0000_0000_0000_0000,
};

/// A catalogue CRC, by register width
#[derive(Clone, Copy)]
enum CrcEngine {
    W8(&'static Crc<u8>),
    W16(&'static Crc<u16>),
    W32(&'static Crc<u32>),
    W64(&'static Crc<u64>),
}

enum CrcState {
    W8(crc::Digest<'static, u8>),
    W16(crc::Digest<'static, u16>),
    W32(crc::Digest<'static, u32>),
    W64(crc::Digest<'static, u64>),
}

impl CrcEngine {
    fn start(self) -> CrcState {
        match self {
            Self::W8(crc) => CrcState::W8(crc.digest()),
            Self::W16(crc) => CrcState::W16(crc.digest()),
            Self::W32(crc) => CrcState::W32(crc.digest()),
            Self::W64(crc) => CrcState::W64(crc.digest()),
        }
    }

    #[cfg(test)]
    fn check(self) -> u64 {
        match self {
            Self::W8(crc) => crc.algorithm.check as u64,
            Self::W16(crc) => crc.algorithm.check as u64,
            Self::W32(crc) => crc.algorithm.check as u64,
            Self::W64(crc) => crc.algorithm.check,
        }
    }
}

macro_rules! crc_catalogue {
    ($($name:literal => $variant:ident($engine:ident: $width:ty = $model:expr);)*) => {
        $(static $engine: Crc<$width> = Crc::<$width>::new(&$model);)*

        /// `(name, engine)` pairs, sorted by name
        static CATALOGUE: &[(&str, CrcEngine)] = &[$(($name, CrcEngine::$variant(&$engine)),)*];
    };
}

crc_catalogue! {
    "CRC-16" => W16(CRC_16: u16 = crc::CRC_16_ARC);
    "CRC-16-BUYPASS" => W16(CRC_16_BUYPASS: u16 = crc::CRC_16_UMTS);
    "CRC-16-DDS-110" => W16(CRC_16_DDS_110: u16 = crc::CRC_16_DDS_110);
    "CRC-16-DECT" => W16(CRC_16_DECT: u16 = crc::CRC_16_DECT_R);
    "CRC-16-DNP" => W16(CRC_16_DNP: u16 = crc::CRC_16_DNP);
    "CRC-16-EN-13757" => W16(CRC_16_EN_13757: u16 = crc::CRC_16_EN_13757);
    "CRC-16-GENIBUS" => W16(CRC_16_GENIBUS: u16 = crc::CRC_16_GENIBUS);
    "CRC-16-MAXIM" => W16(CRC_16_MAXIM: u16 = crc::CRC_16_MAXIM_DOW);
    "CRC-16-MCRF4XX" => W16(CRC_16_MCRF4XX: u16 = crc::CRC_16_MCRF4XX);
    "CRC-16-RIELLO" => W16(CRC_16_RIELLO: u16 = crc::CRC_16_RIELLO);
    "CRC-16-T10-DIF" => W16(CRC_16_T10_DIF: u16 = crc::CRC_16_T10_DIF);
    "CRC-16-TELEDISK" => W16(CRC_16_TELEDISK: u16 = crc::CRC_16_TELEDISK);
    "CRC-16-USB" => W16(CRC_16_USB: u16 = crc::CRC_16_USB);
    "CRC-24" => W32(CRC_24: u32 = crc::CRC_24_OPENPGP);
    "CRC-24-FLEXRAY-A" => W32(CRC_24_FLEXRAY_A: u32 = crc::CRC_24_FLEXRAY_A);
    "CRC-24-FLEXRAY-B" => W32(CRC_24_FLEXRAY_B: u32 = crc::CRC_24_FLEXRAY_B);
    "CRC-32" => W32(CRC_32: u32 = crc::CRC_32_ISO_HDLC);
    "CRC-32-BZIP2" => W32(CRC_32_BZIP2: u32 = crc::CRC_32_BZIP2);
    "CRC-32-MPEG" => W32(CRC_32_MPEG: u32 = crc::CRC_32_MPEG_2);
    "CRC-32C" => W32(CRC_32C: u32 = crc::CRC_32_ISCSI);
    "CRC-32D" => W32(CRC_32D: u32 = crc::CRC_32_BASE91_D);
    "CRC-32Q" => W32(CRC_32Q: u32 = crc::CRC_32_AIXM);
    "CRC-64" => W64(CRC_64: u64 = CRC_64_CRCMOD);
    "CRC-64-JONES" => W64(CRC_64_JONES_ENGINE: u64 = CRC_64_JONES);
    "CRC-64-WE" => W64(CRC_64_WE: u64 = crc::CRC_64_WE);
    "CRC-8" => W8(CRC_8: u8 = crc::CRC_8_SMBUS);
    "CRC-8-DARC" => W8(CRC_8_DARC: u8 = crc::CRC_8_DARC);
    "CRC-8-I-CODE" => W8(CRC_8_I_CODE: u8 = crc::CRC_8_I_CODE);
    "CRC-8-ITU" => W8(CRC_8_ITU: u8 = crc::CRC_8_I_432_1);
    "CRC-8-MAXIM" => W8(CRC_8_MAXIM: u8 = crc::CRC_8_MAXIM_DOW);
    "CRC-8-ROHC" => W8(CRC_8_ROHC: u8 = crc::CRC_8_ROHC);
    "CRC-8-WCDMA" => W8(CRC_8_WCDMA: u8 = crc::CRC_8_WCDMA);
    "CRC-AUG-CCITT" => W16(CRC_AUG_CCITT: u16 = crc::CRC_16_SPI_FUJITSU);
    "CRC-CCITT-FALSE" => W16(CRC_CCITT_FALSE: u16 = crc::CRC_16_IBM_3740);
    "JAMCRC" => W32(JAMCRC: u32 = crc::CRC_32_JAMCRC);
    "KERMIT" => W16(KERMIT: u16 = crc::CRC_16_KERMIT);
    "MODBUS" => W16(MODBUS: u16 = crc::CRC_16_MODBUS);
    "POSIX" => W32(POSIX: u32 = crc::CRC_32_CKSUM);
    "X-25" => W16(X_25: u16 = crc::CRC_16_IBM_SDLC);
    "XFER" => W32(XFER: u32 = crc::CRC_32_XFER);
    "XMODEM" => W16(XMODEM: u16 = crc::CRC_16_XMODEM);
}

struct CrcDigester {
    state: CrcState,
}

impl Digester for CrcDigester {
    fn update(&mut self, chunk: &[u8]) {
        match &mut self.state {
            CrcState::W8(digest) => digest.update(chunk),
            CrcState::W16(digest) => digest.update(chunk),
            CrcState::W32(digest) => digest.update(chunk),
            CrcState::W64(digest) => digest.update(chunk),
        }
    }

    fn finalize(self: Box<Self>) -> String {
        let value = match self.state {
            CrcState::W8(digest) => digest.finalize() as u64,
            CrcState::W16(digest) => digest.finalize() as u64,
            CrcState::W32(digest) => digest.finalize() as u64,
            CrcState::W64(digest) => digest.finalize(),
        };
        format!("{value:#x}")
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::Crc
    }
}

/// The CRC family, sorted by name; CRCs ignore the size hint
pub(crate) fn catalogue() -> impl Iterator<Item = (&'static str, DigesterFactory)> {
    CATALOGUE.iter().map(|&(name, engine)| {
        let factory: DigesterFactory = Box::new(move |_size_hint| {
            Box::new(CrcDigester {
                state: engine.start(),
            })
        });
        (name, factory)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checksum(name: &str, chunks: &[&[u8]]) -> String {
        let (_, factory) = catalogue()
            .find(|(n, _)| *n == name)
            .expect("CRC in catalogue");
        let mut digester = factory(None);
        for chunk in chunks {
            digester.update(chunk);
        }
        digester.finalize()
    }

    #[test]
    fn test_every_model_matches_its_check_value() {
        for &(name, engine) in CATALOGUE {
            assert_eq!(
                checksum(name, &[b"1234", b"56789"]),
                format!("{:#x}", engine.check()),
                "{name}"
            );
        }
    }

    #[test]
    fn test_crc8_itu_of_hi() {
        assert_eq!(checksum("CRC-8-ITU", &[b"Hi"]), "0xbe");
    }

    #[test]
    fn test_crc32_of_empty_input() {
        assert_eq!(checksum("CRC-32", &[]), "0x0");
    }

    #[test]
    fn test_catalogue_is_sorted_and_unique() {
        let names: Vec<_> = CATALOGUE.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 41);
    }
}
