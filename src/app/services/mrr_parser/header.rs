//! Header line decoder for MRR-2 profile headers
//!
//! A profile header line matches exactly one of three fixed layouts,
//! distinguished by their trailing TYP token (RAW, AVE, PRO). Each layout
//! encodes a two-digit timestamp, a time-zone token, and level-specific
//! tagged scalar fields. A line matching no layout yields `None`; the
//! caller treats that as a recoverable per-line failure, never as a fatal
//! error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::app::models::{HeaderRecord, HeaderValue, ProcessingLevel};
use crate::constants::YEAR_BASE;

struct HeaderLayout {
    level: ProcessingLevel,
    pattern: Regex,
    /// Tag symbols captured by the layout, in line order
    scalar_symbols: &'static [&'static str],
}

const TIME_PREFIX: &str = r"^MRR +(?P<year>\d\d)(?P<month>\d\d)(?P<day>\d\d)(?P<hour>\d\d)(?P<minute>\d\d)(?P<second>\d\d) +(?P<time_zone>[^ ]+)";

static LAYOUTS: LazyLock<[HeaderLayout; 3]> = LazyLock::new(|| {
    let raw_tail = r" +DVS +(?P<DVS>[^ ]+) +DSN +(?P<DSN>[^ ]+) +BW +(?P<BW>[^ ]+) +CC +(?P<CC>[^ ]+) +MDQ +(?P<MDQ1>[^ ]+) +(?P<MDQ2>[^ ]+) +(?P<MDQ3>[^ ]+) +TYP (?P<TYP>RAW)\s*$";
    let ave_tail = r" +AVE +(?P<AVE>[^ ]+) +STP +(?P<STP>[^ ]+) +ASL +(?P<ASL>[^ ]+) +SMP +(?P<SMP>[^ ]+) +SVS +(?P<SVS>[^ ]+) +DVS +(?P<DVS>[^ ]+) +DSN +(?P<DSN>[^ ]+) +CC +(?P<CC>[^ ]+) +MDQ +(?P<MDQ1>[^ ]+) +TYP +(?P<TYP>AVE)\s*$";
    let pro_tail = r" +AVE +(?P<AVE>[^ ]+) +STP +(?P<STP>[^ ]+) +ASL +(?P<ASL>[^ ]+) +SMP +(?P<SMP>[^ ]+) +SVS +(?P<SVS>[^ ]+) +DVS +(?P<DVS>[^ ]+) +DSN +(?P<DSN>[^ ]+) +CC +(?P<CC>[^ ]+) +MDQ +(?P<MDQ1>[^ ]+) +TYP +(?P<TYP>PRO)\s*$";

    let compile = |tail: &str| {
        Regex::new(&format!("{TIME_PREFIX}{tail}")).expect("static header layout pattern")
    };

    const RAW_SYMBOLS: &[&str] = &["DVS", "DSN", "BW", "CC", "MDQ1", "MDQ2", "MDQ3", "TYP"];
    const AVE_PRO_SYMBOLS: &[&str] = &[
        "AVE", "STP", "ASL", "SMP", "SVS", "DVS", "DSN", "CC", "MDQ1", "TYP",
    ];

    [
        HeaderLayout {
            level: ProcessingLevel::Raw,
            pattern: compile(raw_tail),
            scalar_symbols: RAW_SYMBOLS,
        },
        HeaderLayout {
            level: ProcessingLevel::Ave,
            pattern: compile(ave_tail),
            scalar_symbols: AVE_PRO_SYMBOLS,
        },
        HeaderLayout {
            level: ProcessingLevel::Pro,
            pattern: compile(pro_tail),
            scalar_symbols: AVE_PRO_SYMBOLS,
        },
    ]
});

/// Coerce a captured token per the static tag-to-type table
///
/// Integer-tagged values later land in float64 arrays where the registry
/// declares them so; the coercion here only fixes the parse, not the
/// storage dtype.
fn coerce(symbol: &str, token: &str) -> Option<HeaderValue> {
    match symbol {
        "AVE" | "STP" | "ASL" | "BW" | "CC" | "MDQ1" | "MDQ2" | "MDQ3" => {
            token.parse::<i64>().ok().map(HeaderValue::Int)
        }
        "SMP" => token.parse::<f64>().ok().map(HeaderValue::Float),
        _ => Some(HeaderValue::Text(token.to_string())),
    }
}

/// Decode one header line against the known layouts
///
/// Returns `None` when no layout matches, when the encoded calendar date is
/// invalid, or when a numeric token fails its declared coercion. Two-digit
/// years are interpreted as 2000+YY.
pub fn decode(line: &str) -> Option<HeaderRecord> {
    for layout in LAYOUTS.iter() {
        let Some(caps) = layout.pattern.captures(line) else {
            continue;
        };

        let two_digits =
            |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = two_digits("year")? as i32 + YEAR_BASE;
        let timestamp = NaiveDate::from_ymd_opt(year, two_digits("month")?, two_digits("day")?)?
            .and_hms_opt(
                two_digits("hour")?,
                two_digits("minute")?,
                two_digits("second")?,
            )?;

        let mut scalars = Vec::with_capacity(layout.scalar_symbols.len());
        for &symbol in layout.scalar_symbols {
            let token = caps.name(symbol)?.as_str();
            scalars.push((symbol, coerce(symbol, token)?));
        }

        return Some(HeaderRecord {
            level: layout.level,
            timestamp,
            time_zone: caps.name("time_zone")?.as_str().to_string(),
            scalars,
        });
    }
    None
}
