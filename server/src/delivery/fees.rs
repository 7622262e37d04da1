//! Delivery fee table for the service area (Serra/ES).
//!
//! Flat fee per neighborhood, in BRL. Addresses are free text, so matching
//! happens by name search (see [`crate::delivery::resolver`]); this table is
//! the source of truth for the values.

/// Neighborhood name -> delivery fee.
pub const NEIGHBORHOOD_FEES: &[(&str, f64)] = &[
    ("Alterosas", 10.20),
    ("André Carloni", 10.30),
    ("Bairro de Fátima", 13.00),
    ("Barcelona", 4.00),
    ("Barro Branco", 2.00),
    ("Bicanga", 15.40),
    ("Boa Vista I", 10.00),
    ("Boa Vista II", 10.50),
    ("Campinho da Serra I", 4.00),
    ("Campinho da Serra II", 3.00),
    ("Cantinho do Céu", 8.00),
    ("Carapina Grande", 9.40),
    ("Cascata", 7.50),
    ("Caçaroca", 6.00),
    ("Chácara Parreiral", 9.00),
    ("Cidade Pomar", 3.00),
    ("Civit I", 9.10),
    ("Civit II", 9.30),
    ("Colina da Serra", 8.00),
    ("Colina de Laranjeiras", 5.00),
    ("Divinópolis", 9.00),
    ("Eldorado", 3.00),
    ("Feu Rosa", 13.40),
    ("Hélio Ferraz", 12.00),
    ("Jardim Bela Vista", 8.00),
    ("Jardim Carapina", 12.00),
    ("Jardim Guanabara", 7.00),
    ("Jardim Limoeiro", 5.00),
    ("Jardim Primavera", 6.30),
    ("Jardim Tropical", 5.00),
    ("Jardim da Serra", 8.00),
    ("José de Anchieta", 6.00),
    ("José de Anchieta II", 6.40),
    ("José de Anchieta III", 5.50),
    ("Laranjeiras Velha", 5.00),
    ("Maria Níobe", 6.00),
    ("Maringá", 3.00),
    ("Mata da Serra", 5.00),
    ("Morada de Laranjeiras", 10.00),
    ("Nova Carapina I", 1.00),
    ("Nova Carapina II", 2.00),
    ("Novo Porto Canoa", 3.00),
    ("Parque Residencial Mestre Álvaro", 1.00),
    ("Pitanga", 3.00),
    ("Planalto de Carapina", 6.50),
    ("Planalto Serrano", 3.50),
    ("Planície da Serra", 6.00),
    ("Polo Industrial Tubarão", 3.00),
    ("Porto Canoa", 3.00),
    ("Santa Luzia", 8.00),
    ("Santo Antônio", 7.30),
    ("São Domingos", 6.40),
    ("São Judas Tadeu", 8.50),
    ("Serra Centro", 6.50),
    ("Serra Dourada I", 3.00),
    ("Serra Dourada II", 3.00),
    ("Serra Dourada III", 3.00),
    ("Taquara I", 5.00),
    ("Taquara II", 5.00),
    ("Valparaíso", 7.00),
];

/// Partial names tried when no full neighborhood name appears in the
/// address. Order matters: more specific tokens come first.
pub const COMMON_TOKENS: &[&str] = &[
    "nova carapina",
    "carapina",
    "serra dourada",
    "vista da serra",
    "porto canoa",
    "campinho da serra",
    "jardim",
    "laranjeiras",
    "taquara",
    "barcelona",
    "eldorado",
    "maringá",
    "pitanga",
];

/// Fee for neighborhoods not in the table, BRL. Overridable through the
/// `configuracao` record.
pub const DEFAULT_FEE: f64 = 3.00;

/// Orders at or above this subtotal ship free, BRL.
pub const FREE_DELIVERY_THRESHOLD: f64 = 50.00;

/// Address literal used by pickup orders. Never routed to a rider.
pub const PICKUP_ADDRESS: &str = "Retirada na loja";

/// All neighborhood names, sorted.
pub fn available_neighborhoods() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = NEIGHBORHOOD_FEES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// Fee for a known neighborhood, case-insensitive exact match. Unknown names
/// get the default fee.
pub fn fee_for_neighborhood(name: &str) -> f64 {
    let wanted = name.to_lowercase();
    NEIGHBORHOOD_FEES
        .iter()
        .find(|(candidate, _)| candidate.to_lowercase() == wanted)
        .map(|(_, fee)| *fee)
        .unwrap_or(DEFAULT_FEE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_the_full_service_area() {
        assert_eq!(NEIGHBORHOOD_FEES.len(), 60);
    }

    #[test]
    fn known_neighborhood_fee() {
        assert_eq!(fee_for_neighborhood("Nova Carapina I"), 1.00);
        assert_eq!(fee_for_neighborhood("Bicanga"), 15.40);
    }

    #[test]
    fn unknown_neighborhood_gets_default() {
        assert_eq!(fee_for_neighborhood("Centro de Vitória"), DEFAULT_FEE);
    }

    #[test]
    fn neighborhoods_are_sorted() {
        let names = available_neighborhoods();
        assert_eq!(names.len(), NEIGHBORHOOD_FEES.len());
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }
}
