//! MySQL subscriber directory over the TPCM `Subscriber` and `Customer`
//! tables.
//!
//! Every call queries the database; nothing is cached.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use tpcm_core::domain::entities::SubscriberSnapshot;
use tpcm_core::errors::DomainError;
use tpcm_core::repositories::SubscriberDirectory;
use tpcm_shared::utils::msisdn::mask_msisdn;

const DIRECTORY_SERVICE: &str = "subscriber_directory";

/// One row per MSISDN; when history rows share the number the active one
/// wins, then the newest
const FIND_BY_MSISDN: &str = r#"
    SELECT s.SUBSCRIBERID, s.MSISDN, s.STATUS, s.SUBSCRIPTIONTYPE,
           c.CUSTOMERID, c.NAME AS CUSTOMER_NAME
    FROM Subscriber s
    JOIN Customer c ON s.CUSTOMERID = c.CUSTOMERID
    WHERE s.MSISDN = ?
    ORDER BY (s.STATUS = 'ACTIVE') DESC, s.SUBSCRIBERID DESC
    LIMIT 1
"#;

/// Reads subscriber identity and status from the TPCM schema
pub struct MySqlSubscriberDirectory {
    pool: MySqlPool,
}

impl MySqlSubscriberDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_snapshot(row: &sqlx::mysql::MySqlRow) -> Result<SubscriberSnapshot, sqlx::Error> {
        Ok(SubscriberSnapshot {
            subscriber_id: row.try_get("SUBSCRIBERID")?,
            msisdn: row.try_get("MSISDN")?,
            status: row.try_get("STATUS")?,
            subscription_type: row
                .try_get::<Option<String>, _>("SUBSCRIPTIONTYPE")?
                .unwrap_or_default(),
            customer_id: row.try_get("CUSTOMERID")?,
            customer_name: row
                .try_get::<Option<String>, _>("CUSTOMER_NAME")?
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl SubscriberDirectory for MySqlSubscriberDirectory {
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<SubscriberSnapshot>, DomainError> {
        // Status is returned rather than filtered so callers can tell unknown
        // from inactive in their logs.
        let row = sqlx::query(FIND_BY_MSISDN)
            .bind(msisdn)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    msisdn = %mask_msisdn(msisdn),
                    error = %e,
                    event = "directory_lookup_failed",
                    "Subscriber directory query failed"
                );
                DomainError::external(DIRECTORY_SERVICE, e.to_string())
            })?;

        row.as_ref()
            .map(Self::row_to_snapshot)
            .transpose()
            .map_err(|e| DomainError::external(DIRECTORY_SERVICE, format!("Malformed row: {}", e)))
    }
}
