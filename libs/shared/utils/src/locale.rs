use chrono::{DateTime, Datelike, Timelike, Utc};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// User-facing appointment dates are always phrased the same way, in
/// pt-BR: `dia 22 de junho, às 08:40h`.
pub fn long_date_pt_br(date: DateTime<Utc>) -> String {
    format!(
        "dia {:02} de {}, às {:02}:{:02}h",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.hour(),
        date.minute()
    )
}
