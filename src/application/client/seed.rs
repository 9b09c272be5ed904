//! Sample data for development databases

use chrono::{TimeZone, Utc};
use log::{info, warn};

use crate::domain::{Client, ClientRepository, DomainResult};

const SAMPLE_CLIENTS: &[(&str, &str, f64, (i32, u32, u32), u32)] = &[
    ("Conceição Evaristo", "10619244881", 1500.0, (1946, 11, 29), 2),
    ("Lázaro Ramos", "10619244882", 2500.0, (1996, 12, 23), 2),
    ("Clarice Lispector", "10919444522", 3800.0, (1960, 4, 13), 2),
    ("Carolina Maria de Jesus", "10419244771", 7500.0, (1996, 12, 23), 0),
    ("Gilberto Gil", "10419344882", 2500.0, (1949, 5, 5), 4),
    ("Djamila Ribeiro", "10619244884", 4500.0, (1975, 11, 10), 1),
    ("Jorge Amado", "10219344681", 10000.0, (1918, 11, 9), 0),
];

/// Insert the sample clients when the store is empty.
///
/// Returns how many clients were inserted.
pub async fn seed_sample_clients(repo: &dyn ClientRepository) -> DomainResult<usize> {
    if repo.count().await? > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for &(name, tax_id, income, (year, month, day), children) in SAMPLE_CLIENTS {
        let Some(birth_date) = Utc.with_ymd_and_hms(year, month, day, 7, 0, 0).single() else {
            warn!("Skipping sample client {}: invalid birth date", name);
            continue;
        };
        repo.save(Client::new(name, tax_id, income, birth_date, children))
            .await?;
        inserted += 1;
    }

    info!("Seeded {} sample clients", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryClientRepository;

    #[tokio::test]
    async fn seeds_only_an_empty_store() {
        let repo = InMemoryClientRepository::new();

        let first = seed_sample_clients(&repo).await.unwrap();
        assert_eq!(first, SAMPLE_CLIENTS.len());
        assert_eq!(repo.count().await.unwrap(), SAMPLE_CLIENTS.len() as u64);

        let second = seed_sample_clients(&repo).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(repo.count().await.unwrap(), SAMPLE_CLIENTS.len() as u64);
    }

    #[tokio::test]
    async fn seeded_data_contains_reference_client() {
        let repo = InMemoryClientRepository::new();
        seed_sample_clients(&repo).await.unwrap();

        let matches = repo.find_by_income(7500.0).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Carolina Maria de Jesus");
        assert_eq!(matches[0].tax_id, "10419244771");
    }
}
