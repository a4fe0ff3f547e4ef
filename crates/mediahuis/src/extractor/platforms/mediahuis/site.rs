use std::fmt;

use serde::{Deserialize, Serialize};

/// The Mediahuis titles whose article pages are supported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Nieuwsblad,
    Standaard,
    GazetVanAntwerpen,
    BelangVanLimburg,
    Limburger,
}

impl Site {
    pub const ALL: [Site; 5] = [
        Site::Nieuwsblad,
        Site::Standaard,
        Site::GazetVanAntwerpen,
        Site::BelangVanLimburg,
        Site::Limburger,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Site::Nieuwsblad => "Het Nieuwsblad",
            Site::Standaard => "De Standaard",
            Site::GazetVanAntwerpen => "Gazet van Antwerpen",
            Site::BelangVanLimburg => "Het Belang van Limburg",
            Site::Limburger => "De Limburger",
        }
    }

    pub fn domain(&self) -> &'static str {
        match self {
            Site::Nieuwsblad => "nieuwsblad.be",
            Site::Standaard => "standaard.be",
            Site::GazetVanAntwerpen => "gva.be",
            Site::BelangVanLimburg => "hbvl.be",
            Site::Limburger => "limburger.nl",
        }
    }

    /// Looks a site up by host name, with or without the `www.` prefix.
    pub fn from_host(host: &str) -> Option<Site> {
        let host = host.trim_start_matches("www.");
        Site::ALL
            .into_iter()
            .find(|site| site.domain().eq_ignore_ascii_case(host))
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Site;

    #[test]
    fn test_from_host() {
        assert_eq!(Site::from_host("www.gva.be"), Some(Site::GazetVanAntwerpen));
        assert_eq!(Site::from_host("limburger.nl"), Some(Site::Limburger));
        assert_eq!(Site::from_host("www.HBVL.be"), Some(Site::BelangVanLimburg));
        assert_eq!(Site::from_host("www.vrt.be"), None);
    }
}
