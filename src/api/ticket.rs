use serde::Deserialize;

/// Raw ticket payload as posted by the ordering backend.
///
/// Every field is optional: the endpoint accepts best-effort input and
/// the normalizer substitutes defaults instead of rejecting.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TicketRequest {
    pub ticket_number: Option<String>,
    pub commande_id: Option<i64>,
    pub commande_numero: Option<String>,
    pub created_at: Option<Timestamp>,
    pub statut_commande: Option<String>,
    pub type_commande: Option<String>,
    pub numero_table: Option<TableNumber>,
    pub total: Option<f64>,
    pub paiement: Option<Payment>,
    pub lignes: Option<Vec<LineItem>>,
}

/// Creation time, either an ISO-8601 string or a numeric epoch
/// (seconds or milliseconds).
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Numeric(f64),
    Text(String),
}

/// Table numbers arrive as strings or integers depending on the client.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TableNumber {
    Text(String),
    Numeric(i64),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Payment {
    pub methode: Option<String>,
    pub statut: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub quantite: Option<i64>,
    pub nom_plat: Option<String>,
    pub commentaire: Option<String>,
    pub prix_unitaire: Option<f64>,
    pub total_ligne: Option<f64>,
}

impl TableNumber {
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Numeric(n) => n.to_string(),
        }
    }
}
