use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domains::scheduling::TimeWindow;

/// Minimum gap between "now" and a booking's start for self-service
/// cancellation to be allowed.
const CANCEL_LEAD_HOURS: i64 = 24;

/// A reservation held on a resource, keyed by the gateway payment id
///
/// One payment buys exactly one booking, so the payment id doubles as the
/// idempotency key for webhook and poll reconciliation. Resource fields are
/// denormalized from payment metadata at write time: the booking must stay
/// readable even if the resource row is later edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub payment_id: String,
    pub user_id: Option<String>,
    pub user_email: String,
    pub resource_id: String,
    pub resource_name: String,
    pub category: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub total_cents: i64,
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

/// Field-for-field what `create_if_absent` inserts
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub payment_id: String,
    pub user_id: Option<String>,
    pub user_email: String,
    pub resource_id: String,
    pub resource_name: String,
    pub category: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub total_cents: i64,
}

/// What happened when a paid payment was reconciled against the store
#[derive(Debug)]
pub enum CreateOutcome {
    /// This call inserted the booking
    Created(Booking),
    /// A booking for this payment id already existed; returned unmodified
    Existing(Booking),
    /// The requested window overlaps a booking held by another payment.
    /// Nothing was written.
    Conflict,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The booking starts too soon (or already started)
    TooLate,
    NotFound,
}

impl Booking {
    /// The booked window, if the row holds a real one. Degraded rows written
    /// from unparsable metadata carry a zero-length sentinel and return None;
    /// they can never conflict with anything.
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.starts_at, self.ends_at).ok()
    }

    pub async fn find_by_payment_id(payment_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE payment_id = $1")
                .bind(payment_id)
                .fetch_optional(pool)
                .await?;

        Ok(booking)
    }

    /// Record a booking exactly once per payment id
    ///
    /// Runs in one transaction, serialized per resource by a FOR UPDATE lock
    /// on the resource row:
    ///   1. if a booking for this payment id exists, return it untouched
    ///      (first write wins; later deliveries see `Existing`)
    ///   2. re-check the window against every booking held on the resource;
    ///      an overlap means money was taken for a slot that got double-sold,
    ///      so report `Conflict` and write nothing
    ///   3. insert with ON CONFLICT DO NOTHING; losing a same-id race
    ///      downgrades to `Existing` with the winner's row
    ///
    /// Unknown resource ids (stale metadata) skip the lock and the overlap
    /// check but still insert: a paid payment must always leave a record.
    pub async fn create_if_absent(draft: &NewBooking, pool: &PgPool) -> Result<CreateOutcome> {
        let mut tx = pool.begin().await?;

        let resource_known =
            sqlx::query_scalar::<_, String>("SELECT id FROM resources WHERE id = $1 FOR UPDATE")
                .bind(&draft.resource_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();

        let existing =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE payment_id = $1")
                .bind(&draft.payment_id)
                .fetch_optional(&mut *tx)
                .await?;
        if let Some(existing) = existing {
            tx.commit().await?;
            return Ok(CreateOutcome::Existing(existing));
        }

        if resource_known {
            let conflicting = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM bookings
                 WHERE resource_id = $1 AND starts_at < $3 AND $2 < ends_at",
            )
            .bind(&draft.resource_id)
            .bind(draft.starts_at)
            .bind(draft.ends_at)
            .fetch_one(&mut *tx)
            .await?;

            if conflicting > 0 {
                tx.rollback().await?;
                return Ok(CreateOutcome::Conflict);
            }
        }

        let inserted = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings
                 (payment_id, user_id, user_email, resource_id, resource_name,
                  category, location, starts_at, ends_at, total_cents)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (payment_id) DO NOTHING
             RETURNING *",
        )
        .bind(&draft.payment_id)
        .bind(&draft.user_id)
        .bind(&draft.user_email)
        .bind(&draft.resource_id)
        .bind(&draft.resource_name)
        .bind(&draft.category)
        .bind(&draft.location)
        .bind(draft.starts_at)
        .bind(draft.ends_at)
        .bind(draft.total_cents)
        .fetch_optional(&mut *tx)
        .await?;

        match inserted {
            Some(booking) => {
                tx.commit().await?;
                Ok(CreateOutcome::Created(booking))
            }
            None => {
                // Lost a same-payment-id race on the unlocked path
                let winner =
                    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE payment_id = $1")
                        .bind(&draft.payment_id)
                        .fetch_one(&mut *tx)
                        .await?;
                tx.commit().await?;
                Ok(CreateOutcome::Existing(winner))
            }
        }
    }

    /// Claim the right to send the confirmation for this booking
    ///
    /// Atomically flips `notified` false -> true and reports whether this
    /// call did the flip. Concurrent reconciliations of the same payment get
    /// `true` exactly once, which is what keeps the email single-send.
    pub async fn set_notified(payment_id: &str, pool: &PgPool) -> Result<bool> {
        let updated = sqlx::query_scalar::<_, String>(
            "UPDATE bookings SET notified = TRUE
             WHERE payment_id = $1 AND notified = FALSE
             RETURNING payment_id",
        )
        .bind(payment_id)
        .fetch_optional(pool)
        .await?;

        Ok(updated.is_some())
    }

    /// Give the claim back after a failed send so a later reconciliation
    /// retries the email
    pub async fn clear_notified(payment_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE bookings SET notified = FALSE WHERE payment_id = $1")
            .bind(payment_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// All bookings held on a resource, earliest first
    pub async fn find_for_resource(resource_id: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE resource_id = $1 ORDER BY starts_at",
        )
        .bind(resource_id)
        .fetch_all(pool)
        .await?;

        Ok(bookings)
    }

    pub async fn find_by_user_email(user_email: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_email = $1 ORDER BY starts_at DESC",
        )
        .bind(user_email)
        .fetch_all(pool)
        .await?;

        Ok(bookings)
    }

    /// Cancel a booking if it starts at least 24 hours after `now`
    ///
    /// The lead-time guard lives in the DELETE predicate, so a cancel racing
    /// the deadline cannot remove a booking that just became too late.
    pub async fn cancel(
        payment_id: &str,
        now: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<CancelOutcome> {
        let deadline = now + Duration::hours(CANCEL_LEAD_HOURS);

        let deleted = sqlx::query_scalar::<_, String>(
            "DELETE FROM bookings WHERE payment_id = $1 AND starts_at >= $2
             RETURNING payment_id",
        )
        .bind(payment_id)
        .bind(deadline)
        .fetch_optional(pool)
        .await?;

        if deleted.is_some() {
            return Ok(CancelOutcome::Cancelled);
        }

        let exists =
            sqlx::query_scalar::<_, String>("SELECT payment_id FROM bookings WHERE payment_id = $1")
                .bind(payment_id)
                .fetch_optional(pool)
                .await?;

        Ok(if exists.is_some() {
            CancelOutcome::TooLate
        } else {
            CancelOutcome::NotFound
        })
    }
}
