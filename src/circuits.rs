//! Static circuit metadata for race hosting countries.
//!
//! The event tracker only reports the hosting country and locality of a
//! race weekend. This module maps the country name to the circuit
//! metadata used for weather lookups and circuit layout photos.

/// Circuit metadata of a race hosting country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circuit {
    /// Locality of the circuit, suitable for weather lookups.
    pub locality: &'static str,
    /// ISO 3166-1 alpha-2 code of the hosting country.
    pub country_code: &'static str,
    /// File name of the circuit layout image.
    pub layout_image: &'static str,
    /// Flag emoji of the hosting country.
    pub flag: &'static str,
}

const fn circuit(
    locality: &'static str,
    country_code: &'static str,
    layout_image: &'static str,
    flag: &'static str,
) -> Circuit {
    Circuit {
        locality,
        country_code,
        layout_image,
        flag,
    }
}

/// Look up the circuit metadata for a hosting country.
///
/// Country names follow the event tracker naming. Returns [`None`] for
/// countries without circuit data, in which case callers fall back to the
/// locality reported by the event tracker.
pub fn lookup_circuit(country: &str) -> Option<Circuit> {
    let circuit = match country {
        "Australia" => circuit("Melbourne", "AU", "australia.png", "\u{1F1E6}\u{1F1FA}"),
        "Austria" => circuit("Spielberg", "AT", "austria.png", "\u{1F1E6}\u{1F1F9}"),
        "Azerbaijan" => circuit("Baku", "AZ", "azerbaijan.png", "\u{1F1E6}\u{1F1FF}"),
        "Bahrain" => circuit("Sakhir", "BH", "bahrain.png", "\u{1F1E7}\u{1F1ED}"),
        "Belgium" => circuit("Spa", "BE", "belgium.png", "\u{1F1E7}\u{1F1EA}"),
        "Brazil" => circuit("Sao Paulo", "BR", "brazil.png", "\u{1F1E7}\u{1F1F7}"),
        "Canada" => circuit("Montreal", "CA", "canada.png", "\u{1F1E8}\u{1F1E6}"),
        "China" => circuit("Shanghai", "CN", "china.png", "\u{1F1E8}\u{1F1F3}"),
        "France" => circuit("Le Castellet", "FR", "france.png", "\u{1F1EB}\u{1F1F7}"),
        "Germany" => circuit("Hockenheim", "DE", "germany.png", "\u{1F1E9}\u{1F1EA}"),
        "Great Britain" | "United Kingdom" => {
            circuit("Silverstone", "GB", "great-britain.png", "\u{1F1EC}\u{1F1E7}")
        }
        "Hungary" => circuit("Budapest", "HU", "hungary.png", "\u{1F1ED}\u{1F1FA}"),
        "Italy" => circuit("Monza", "IT", "italy.png", "\u{1F1EE}\u{1F1F9}"),
        "Japan" => circuit("Suzuka", "JP", "japan.png", "\u{1F1EF}\u{1F1F5}"),
        "Mexico" => circuit("Mexico City", "MX", "mexico.png", "\u{1F1F2}\u{1F1FD}"),
        "Monaco" => circuit("Monaco", "MC", "monaco.png", "\u{1F1F2}\u{1F1E8}"),
        "Netherlands" => circuit("Zandvoort", "NL", "netherlands.png", "\u{1F1F3}\u{1F1F1}"),
        "Portugal" => circuit("Portimao", "PT", "portugal.png", "\u{1F1F5}\u{1F1F9}"),
        "Qatar" => circuit("Lusail", "QA", "qatar.png", "\u{1F1F6}\u{1F1E6}"),
        "Russia" => circuit("Sochi", "RU", "russia.png", "\u{1F1F7}\u{1F1FA}"),
        "Saudi Arabia" => circuit("Jeddah", "SA", "saudi-arabia.png", "\u{1F1F8}\u{1F1E6}"),
        "Singapore" => circuit("Singapore", "SG", "singapore.png", "\u{1F1F8}\u{1F1EC}"),
        "Spain" => circuit("Montmelo", "ES", "spain.png", "\u{1F1EA}\u{1F1F8}"),
        "Turkey" => circuit("Istanbul", "TR", "turkey.png", "\u{1F1F9}\u{1F1F7}"),
        "United Arab Emirates" => circuit(
            "Abu Dhabi",
            "AE",
            "united-arab-emirates.png",
            "\u{1F1E6}\u{1F1EA}",
        ),
        "United States" | "USA" => {
            circuit("Austin", "US", "united-states.png", "\u{1F1FA}\u{1F1F8}")
        }
        "Vietnam" => circuit("Hanoi", "VN", "vietnam.png", "\u{1F1FB}\u{1F1F3}"),
        _ => return None,
    };

    Some(circuit)
}

/// Flag emoji for a hosting country, or an empty string when unknown.
pub fn country_flag(country: &str) -> &'static str {
    lookup_circuit(country).map(|circuit| circuit.flag).unwrap_or("")
}
