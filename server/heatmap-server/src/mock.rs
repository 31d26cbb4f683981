//! Mock NIFTY constituents with deterministic daily quotes

use chrono::NaiveDate;
use heatmap_core::DATE_FORMAT;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Market cap (INR) separating large caps from mid caps
pub const LARGE_CAP_MIN: f64 = 2.0e12;

pub const INDICES: &[&str] = &["NIFTY50", "NIFTYBANK", "NIFTYIT"];

pub struct Company {
    pub symbol: &'static str,
    pub name: &'static str,
    pub sector: &'static str,
    pub base_price: f64,
    pub base_market_cap: f64,
}

const fn co(
    symbol: &'static str,
    name: &'static str,
    sector: &'static str,
    base_price: f64,
    base_market_cap: f64,
) -> Company {
    Company {
        symbol,
        name,
        sector,
        base_price,
        base_market_cap,
    }
}

static COMPANIES: &[Company] = &[
    co("RELIANCE", "Reliance Industries", "ENERGY", 2890.0, 19.5e12),
    co("ONGC", "Oil & Natural Gas Corp", "ENERGY", 268.0, 3.4e12),
    co("NTPC", "NTPC", "ENERGY", 358.0, 3.5e12),
    co("HDFCBANK", "HDFC Bank", "FINANCE", 1530.0, 11.6e12),
    co("ICICIBANK", "ICICI Bank", "FINANCE", 1085.0, 7.6e12),
    co("SBIN", "State Bank of India", "FINANCE", 765.0, 6.8e12),
    co("KOTAKBANK", "Kotak Mahindra Bank", "FINANCE", 1720.0, 3.4e12),
    co("AXISBANK", "Axis Bank", "FINANCE", 1140.0, 3.5e12),
    co("BAJFINANCE", "Bajaj Finance", "FINANCE", 6950.0, 4.3e12),
    co("INDUSINDBK", "IndusInd Bank", "FINANCE", 1480.0, 1.15e12),
    co("BANKBARODA", "Bank of Baroda", "FINANCE", 262.0, 1.35e12),
    co("PNB", "Punjab National Bank", "FINANCE", 124.0, 1.37e12),
    co("FEDERALBNK", "Federal Bank", "FINANCE", 158.0, 0.39e12),
    co("IDFCFIRSTB", "IDFC First Bank", "FINANCE", 82.0, 0.58e12),
    co("AUBANK", "AU Small Finance Bank", "FINANCE", 625.0, 0.46e12),
    co("TCS", "Tata Consultancy Services", "IT", 3880.0, 14.0e12),
    co("INFY", "Infosys", "IT", 1490.0, 6.2e12),
    co("HCLTECH", "HCL Technologies", "IT", 1380.0, 3.7e12),
    co("WIPRO", "Wipro", "IT", 465.0, 2.4e12),
    co("TECHM", "Tech Mahindra", "IT", 1270.0, 1.2e12),
    co("LTIM", "LTIMindtree", "IT", 4780.0, 1.4e12),
    co("PERSISTENT", "Persistent Systems", "IT", 3420.0, 0.52e12),
    co("COFORGE", "Coforge", "IT", 5210.0, 0.33e12),
    co("MPHASIS", "Mphasis", "IT", 2350.0, 0.44e12),
    co("HINDUNILVR", "Hindustan Unilever", "FMCG", 2270.0, 5.3e12),
    co("ITC", "ITC", "FMCG", 430.0, 5.4e12),
    co("NESTLEIND", "Nestle India", "FMCG", 2480.0, 2.4e12),
    co("MARUTI", "Maruti Suzuki", "AUTO", 12400.0, 3.9e12),
    co("TATAMOTORS", "Tata Motors", "AUTO", 990.0, 3.6e12),
    co("M&M", "Mahindra & Mahindra", "AUTO", 2050.0, 2.5e12),
    co("SUNPHARMA", "Sun Pharmaceutical", "PHARMA", 1530.0, 3.7e12),
    co("DRREDDY", "Dr. Reddy's Laboratories", "PHARMA", 6100.0, 1.0e12),
    co("TATASTEEL", "Tata Steel", "METALS", 162.0, 2.0e12),
    co("JSWSTEEL", "JSW Steel", "METALS", 860.0, 2.1e12),
    co("BHARTIARTL", "Bharti Airtel", "TELECOM", 1240.0, 7.1e12),
];

static NIFTY50: &[&str] = &[
    "RELIANCE", "ONGC", "NTPC", "HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK", "AXISBANK",
    "BAJFINANCE", "INDUSINDBK", "TCS", "INFY", "HCLTECH", "WIPRO", "TECHM", "LTIM",
    "HINDUNILVR", "ITC", "NESTLEIND", "MARUTI", "TATAMOTORS", "M&M", "SUNPHARMA", "DRREDDY",
    "TATASTEEL", "JSWSTEEL", "BHARTIARTL",
];

static NIFTYBANK: &[&str] = &[
    "HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK", "AXISBANK", "INDUSINDBK", "BANKBARODA",
    "PNB", "FEDERALBNK", "IDFCFIRSTB", "AUBANK",
];

static NIFTYIT: &[&str] = &[
    "TCS", "INFY", "HCLTECH", "WIPRO", "TECHM", "LTIM", "PERSISTENT", "COFORGE", "MPHASIS",
];

/// Constituent symbols of an index (case-insensitive lookup)
pub fn constituents(index: &str) -> Option<&'static [&'static str]> {
    match index.to_ascii_uppercase().as_str() {
        "NIFTY50" => Some(NIFTY50),
        "NIFTYBANK" => Some(NIFTYBANK),
        "NIFTYIT" => Some(NIFTYIT),
        _ => None,
    }
}

pub fn company(symbol: &str) -> Option<&'static Company> {
    COMPANIES.iter().find(|c| c.symbol == symbol)
}

/// Market-cap bucket filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    LargeCap,
    MidCap,
}

impl Category {
    /// Unknown or missing values behave as `ALL`
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_uppercase).as_deref() {
            Some("LARGE_CAP") => Self::LargeCap,
            Some("MID_CAP") => Self::MidCap,
            _ => Self::All,
        }
    }

    pub fn admits(&self, market_cap: f64) -> bool {
        match self {
            Self::All => true,
            Self::LargeCap => market_cap >= LARGE_CAP_MIN,
            Self::MidCap => market_cap < LARGE_CAP_MIN,
        }
    }
}

/// One constituent quote as served by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
    pub change: f64,
    pub volume: u64,
    pub market_cap: f64,
    pub pe: f64,
}

// FNV-1a: stable across builds, unlike `DefaultHasher`
fn seed(symbol: &str, date: NaiveDate) -> u64 {
    let date = date.format(DATE_FORMAT).to_string();
    symbol
        .bytes()
        .chain(std::iter::once(b'|'))
        .chain(date.bytes())
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Deterministic quote for `company` on `date`
pub fn quote(company: &Company, date: NaiveDate) -> Quote {
    let mut rng = StdRng::seed_from_u64(seed(company.symbol, date));

    let change = round_to(rng.gen_range(-4.5..4.5), 2);
    let factor = 1.0 + change / 100.0;

    Quote {
        symbol: company.symbol.to_string(),
        name: company.name.to_string(),
        sector: company.sector.to_string(),
        price: round_to(company.base_price * factor, 2),
        change,
        volume: rng.gen_range(50_000..25_000_000),
        market_cap: round_to(company.base_market_cap * factor, 0),
        pe: round_to(rng.gen_range(8.0..65.0), 1),
    }
}

/// Quotes for an index on a date, optionally narrowed by sector and category.
/// Returns `None` for an unknown index.
pub fn snapshot(
    index: &str,
    sector: Option<&str>,
    category: Category,
    date: NaiveDate,
) -> Option<Vec<Quote>> {
    let symbols = constituents(index)?;
    let quotes = symbols
        .iter()
        .filter_map(|symbol| company(symbol))
        .filter(|c| sector.is_none_or(|s| c.sector.eq_ignore_ascii_case(s)))
        .map(|c| quote(c, date))
        .filter(|q| category.admits(q.market_cap))
        .collect();
    Some(quotes)
}
