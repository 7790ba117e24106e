use serde::Serialize;

/// An exchange-traded fund the simulator offers for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Etf {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// The funds offered for selection, in display order.
pub const ETF_CATALOGUE: &[Etf] = &[
    Etf { symbol: "SPY", name: "SPDR S&P 500" },
    Etf { symbol: "EEM", name: "iShares MSCI Emerging" },
    Etf { symbol: "VTI", name: "Vanguard Total Stock" },
    Etf { symbol: "QQQ", name: "Invesco QQQ" },
    Etf { symbol: "IWM", name: "iShares Russell" },
    Etf { symbol: "DIA", name: "SPDR DJIA Trust" },
    Etf { symbol: "VWO", name: "Vanguard Emerging Market" },
    Etf { symbol: "XLF", name: "Financial Select Sector SPDR" },
    Etf { symbol: "XLV", name: "Health Care Select Sector" },
    Etf { symbol: "ITB", name: "DJ US Home Construct" },
    Etf { symbol: "SLV", name: "Silver Trust" },
    Etf { symbol: "EWT", name: "MSCI Taiwan Index FD" },
    Etf { symbol: "EWU", name: "MSCI United Kingdom" },
    Etf { symbol: "EWY", name: "MSCI South Korea IND" },
    Etf { symbol: "EWJ", name: "MSCI Japan Index FD" },
];

/// Looks up a catalogue entry by ticker, ignoring case.
pub fn find_etf(symbol: &str) -> Option<&'static Etf> {
    ETF_CATALOGUE
        .iter()
        .find(|etf| etf.symbol.eq_ignore_ascii_case(symbol))
}

/// A human-readable label such as `"SPDR S&P 500 (SPY)"`.
///
/// Symbols outside the catalogue are labelled with the ticker alone.
pub fn display_name(symbol: &str) -> String {
    match find_etf(symbol) {
        Some(etf) => format!("{} ({})", etf.name, etf.symbol),
        None => symbol.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_etf("qqq").map(|e| e.name), Some("Invesco QQQ"));
        assert!(find_etf("NOPE").is_none());
    }

    #[test]
    fn display_name_falls_back_to_symbol() {
        assert_eq!(display_name("SPY"), "SPDR S&P 500 (SPY)");
        assert_eq!(display_name("ZZZ"), "ZZZ");
    }

    #[test]
    fn catalogue_has_unique_symbols() {
        for (i, a) in ETF_CATALOGUE.iter().enumerate() {
            assert!(ETF_CATALOGUE[i + 1..].iter().all(|b| b.symbol != a.symbol));
        }
        assert_eq!(ETF_CATALOGUE.len(), 15);
    }
}
