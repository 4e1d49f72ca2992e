use serde::Serialize;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    OffsetDateTime, PrimitiveDateTime,
};

use crate::api::{
    ticket::{TableNumber, Timestamp},
    TicketRequest,
};

const ADDRESS: &str = "Moroni Oasis";
const PHONE: &str = "434 00 04 / 434 00 05";
const WEBSITE: &str = "https://mat-inma.com";

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
const NAIVE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Template-ready projection of a [`TicketRequest`].
///
/// Invariant: every field is populated, with "-", 0 or the current time
/// standing in for missing input, so rendering cannot fail on absent
/// fields.
#[derive(Clone, Debug, Serialize)]
pub struct RenderContext {
    pub numero_commande: String,
    pub numero_ticket: String,
    pub date: String,
    pub heure: String,
    pub items: Vec<Item>,
    pub total: i64,
    pub paiement: String,
    pub type_commande: String,
    pub numero_table: String,
    pub adresse: &'static str,
    pub telephone: &'static str,
    pub site_web: &'static str,
    pub qr_code_data_uri: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Item {
    pub nom: String,
    pub quantite: i64,
    pub prix: i64,
    pub prix_unitaire: i64,
    pub commentaire: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum OrderType {
    DineIn,
    Takeaway,
    Other,
}

impl OrderType {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("sur_place") | Some("sur place") => Self::DineIn,
            Some("a_emporter") | Some("emporter") | Some("à emporter") => {
                Self::Takeaway
            }
            _ => Self::Other,
        }
    }
}

/// Builds a fully-populated [`RenderContext`] out of a loosely-filled
/// payload. Never fails: absent or malformed optional fields are
/// replaced by their defaults.
pub fn normalize(ticket: &TicketRequest) -> RenderContext {
    let (date, heure) = format_created_at(ticket.created_at.as_ref());

    let type_raw = ticket
        .type_commande
        .as_deref()
        .filter(|s| !s.is_empty());
    let order_type = OrderType::parse(type_raw);

    let numero_table = match order_type {
        // Takeaway orders have no table, whatever the client sent.
        OrderType::DineIn => ticket
            .numero_table
            .as_ref()
            .map(TableNumber::display)
            .unwrap_or_else(|| "-".to_string()),
        OrderType::Takeaway | OrderType::Other => "-".to_string(),
    };

    let items = ticket
        .lignes
        .iter()
        .flatten()
        .map(|ligne| Item {
            nom: some_or_dash(ligne.nom_plat.as_deref()),
            quantite: ligne.quantite.unwrap_or(0),
            prix: round_amount(ligne.total_ligne.unwrap_or(0.0)),
            prix_unitaire: round_amount(ligne.prix_unitaire.unwrap_or(0.0)),
            commentaire: ligne
                .commentaire
                .clone()
                .filter(|c| !c.is_empty()),
        })
        .collect();

    RenderContext {
        numero_commande: some_or_dash(ticket.commande_numero.as_deref()),
        numero_ticket: some_or_dash(ticket.ticket_number.as_deref()),
        date,
        heure,
        items,
        total: round_amount(ticket.total.unwrap_or(0.0)),
        paiement: payment_label(
            ticket
                .paiement
                .as_ref()
                .and_then(|p| p.methode.as_deref()),
        ),
        type_commande: order_type_label(order_type, type_raw),
        numero_table,
        adresse: ADDRESS,
        telephone: PHONE,
        site_web: WEBSITE,
        qr_code_data_uri: None,
    }
}

fn format_created_at(created_at: Option<&Timestamp>) -> (String, String) {
    let created_at = created_at
        .and_then(parse_created_at)
        .unwrap_or_else(OffsetDateTime::now_utc);
    (
        created_at.format(DATE_FORMAT).unwrap_or_default(),
        created_at.format(TIME_FORMAT).unwrap_or_default(),
    )
}

fn parse_created_at(value: &Timestamp) -> Option<OffsetDateTime> {
    match value {
        Timestamp::Numeric(n) => {
            // Values above 1e12 are epoch milliseconds.
            let secs = if *n > 1e12 { n / 1000.0 } else { *n };
            OffsetDateTime::from_unix_timestamp(secs as i64).ok()
        }
        Timestamp::Text(s) => OffsetDateTime::parse(s, &Rfc3339)
            .ok()
            .or_else(|| {
                PrimitiveDateTime::parse(s, NAIVE_FORMAT)
                    .ok()
                    .map(PrimitiveDateTime::assume_utc)
            }),
    }
}

fn payment_label(methode: Option<&str>) -> String {
    let raw = match methode.filter(|m| !m.is_empty()) {
        Some(raw) => raw,
        None => return "-".to_string(),
    };
    match raw.to_lowercase().as_str() {
        "espece" | "especes" | "cash" => "Espèces".to_string(),
        "holo" => "Holo".to_string(),
        "mvula" => "Mvula".to_string(),
        _ => capitalize(raw),
    }
}

fn order_type_label(order_type: OrderType, raw: Option<&str>) -> String {
    match order_type {
        OrderType::DineIn => "Sur place".to_string(),
        OrderType::Takeaway => "À emporter".to_string(),
        // Unknown types keep their original casing.
        OrderType::Other => raw.map_or_else(|| "-".to_string(), String::from),
    }
}

// Monetary amounts display as whole currency units, ties rounding to
// even.
fn round_amount(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn some_or_dash(value: Option<&str>) -> String {
    match value.filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => "-".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
