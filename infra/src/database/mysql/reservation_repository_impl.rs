//! MySQL implementation of the ReservationRepository trait.
//!
//! Creation takes a row lock on the product (`SELECT ... FOR UPDATE`) so
//! concurrent creations for one product are serialized between the
//! capacity check and the insert. Status changes are conditional updates
//! on the previous status.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use cc_core::domain::entities::{Reservation, ReservationStatus};
use cc_core::domain::value_objects::{Availability, ReservationPeriod};
use cc_core::errors::DomainError;
use cc_core::repositories::{ReservationRepository, ReservationWrite};

const RESERVATION_COLUMNS: &str =
    "id, product_id, user_id, start_date, end_date, quantity, status, created_at, updated_at";

/// MySQL implementation of ReservationRepository
pub struct MySqlReservationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlReservationRepository {
    /// Create a new MySQL reservation repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Reservation entity
    fn row_to_reservation(row: &MySqlRow) -> Result<Reservation, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;
        let product_id: String = row.try_get("product_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get product_id: {}", e),
        })?;
        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;
        let start_date: NaiveDate = row.try_get("start_date").map_err(|e| DomainError::Internal {
            message: format!("Failed to get start_date: {}", e),
        })?;
        let end_date: NaiveDate = row.try_get("end_date").map_err(|e| DomainError::Internal {
            message: format!("Failed to get end_date: {}", e),
        })?;
        let status: String = row.try_get("status").map_err(|e| DomainError::Internal {
            message: format!("Failed to get status: {}", e),
        })?;

        Ok(Reservation {
            id: parse_uuid(&id, "reservation")?,
            product_id: parse_uuid(&product_id, "product")?,
            user_id: parse_uuid(&user_id, "user")?,
            period: ReservationPeriod::new(start_date, end_date).map_err(|e| {
                DomainError::Internal {
                    message: format!("Stored reservation {} has invalid dates: {}", id, e),
                }
            })?,
            quantity: row.try_get("quantity").map_err(|e| DomainError::Internal {
                message: format!("Failed to get quantity: {}", e),
            })?,
            status: status.parse().map_err(|e| DomainError::Internal {
                message: format!("Stored reservation {} has unknown status: {}", id, e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }

    fn rows_to_reservations(rows: &[MySqlRow]) -> Result<Vec<Reservation>, DomainError> {
        rows.iter().map(Self::row_to_reservation).collect()
    }
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid {} UUID: {}", what, e),
    })
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn create_if_available(
        &self,
        reservation: Reservation,
        capacity: u32,
    ) -> Result<ReservationWrite, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        // Serializes creations for this product until commit
        let locked = sqlx::query("SELECT id FROM products WHERE id = ? FOR UPDATE")
            .bind(reservation.product_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to lock product: {}", e),
            })?;
        if locked.is_none() {
            return Err(DomainError::product_not_found(reservation.product_id));
        }

        let query = format!(
            "SELECT {} FROM reservations \
             WHERE product_id = ? AND status IN ('PENDING', 'CONFIRMED') \
             AND start_date <= ? AND end_date >= ?",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(reservation.product_id.to_string())
            .bind(reservation.period.end_date())
            .bind(reservation.period.start_date())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load overlapping reservations: {}", e),
            })?;
        let existing = Self::rows_to_reservations(&rows)?;

        let availability = Availability::evaluate(
            capacity,
            existing.iter(),
            &reservation.period,
            reservation.quantity,
        );
        if !availability.available {
            tx.rollback().await.map_err(|e| DomainError::Internal {
                message: format!("Failed to roll back: {}", e),
            })?;
            return Ok(ReservationWrite::Rejected(availability));
        }

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, product_id, user_id, start_date, end_date, quantity, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reservation.id.to_string())
        .bind(reservation.product_id.to_string())
        .bind(reservation.user_id.to_string())
        .bind(reservation.period.start_date())
        .bind(reservation.period.end_date())
        .bind(reservation.quantity)
        .bind(reservation.status.as_str())
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to insert reservation: {}", e),
        })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit reservation: {}", e),
        })?;

        tracing::debug!(
            reservation_id = %reservation.id,
            product_id = %reservation.product_id,
            "Reservation row inserted"
        );

        Ok(ReservationWrite::Created(reservation))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, DomainError> {
        let query = format!("SELECT {} FROM reservations WHERE id = ?", RESERVATION_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find reservation: {}", e),
            })?;

        row.as_ref().map(Self::row_to_reservation).transpose()
    }

    async fn find_blocking_overlapping(
        &self,
        product_id: Uuid,
        period: &ReservationPeriod,
    ) -> Result<Vec<Reservation>, DomainError> {
        let query = format!(
            "SELECT {} FROM reservations \
             WHERE product_id = ? AND status IN ('PENDING', 'CONFIRMED') \
             AND start_date <= ? AND end_date >= ?",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(product_id.to_string())
            .bind(period.end_date())
            .bind(period.start_date())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load overlapping reservations: {}", e),
            })?;

        Self::rows_to_reservations(&rows)
    }

    async fn find_active_by_product(&self, product_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        let query = format!(
            "SELECT {} FROM reservations \
             WHERE product_id = ? AND status IN ('PENDING', 'CONFIRMED') \
             ORDER BY start_date ASC, created_at ASC",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(product_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load product reservations: {}", e),
            })?;

        Self::rows_to_reservations(&rows)
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
        new_status: ReservationStatus,
    ) -> Result<Option<Reservation>, DomainError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(new_status.as_str())
        .bind(Utc::now())
        .bind(id.to_string())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to update reservation status: {}", e),
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Reservation>, DomainError> {
        let query = format!(
            "SELECT {} FROM reservations WHERE user_id = ? ORDER BY created_at DESC",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load user reservations: {}", e),
            })?;

        Self::rows_to_reservations(&rows)
    }

    async fn find_by_user_and_status(
        &self,
        user_id: Uuid,
        status: ReservationStatus,
    ) -> Result<Vec<Reservation>, DomainError> {
        let query = format!(
            "SELECT {} FROM reservations WHERE user_id = ? AND status = ? ORDER BY created_at DESC",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load user reservations: {}", e),
            })?;

        Self::rows_to_reservations(&rows)
    }
}
