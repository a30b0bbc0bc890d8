use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::trip_dto::{TripDto, TripRequest};
use crate::models::{Trip, TripStatus};
use crate::utils::errors::AppError;

const SELECT_TRIP_DTO: &str = r#"
    SELECT t.id, t.trip_number, t.customer_id, c.name AS customer_name,
           t.truck_id, tr.license_plate AS truck_license_plate,
           t.driver_id, d.full_name AS driver_name, t.dispatcher_id,
           t.origin, t.destination, t.scheduled_date, t.actual_start_date, t.actual_end_date,
           t.status, t.distance, t.fuel_cost, t.other_costs, t.notes, t.created_at, t.updated_at
    FROM trips t
    JOIN customers c ON c.id = t.customer_id
    JOIN trucks tr ON tr.id = t.truck_id
    JOIN drivers d ON d.id = t.driver_id
"#;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<TripDto>, AppError> {
        let sql = format!("{} ORDER BY t.scheduled_date DESC", SELECT_TRIP_DTO);
        let trips = sqlx::query_as::<_, TripDto>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }

    pub async fn find_dto_by_id(&self, id: Uuid) -> Result<Option<TripDto>, AppError> {
        let sql = format!("{} WHERE t.id = $1", SELECT_TRIP_DTO);
        let trip = sqlx::query_as::<_, TripDto>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM trips WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Inserta un viaje nuevo en estado `Scheduled`
    pub async fn create(
        &self,
        trip_number: &str,
        request: &TripRequest,
        dispatcher_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO trips (id, trip_number, customer_id, truck_id, driver_id, dispatcher_id,
                               origin, destination, scheduled_date, status, distance,
                               fuel_cost, other_costs, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(id)
        .bind(trip_number)
        .bind(request.customer_id)
        .bind(request.truck_id)
        .bind(request.driver_id)
        .bind(dispatcher_id)
        .bind(request.origin.trim())
        .bind(request.destination.trim())
        .bind(request.scheduled_date)
        .bind(TripStatus::Scheduled)
        .bind(request.distance)
        .bind(request.fuel_cost)
        .bind(request.other_costs)
        .bind(&request.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(&self, id: Uuid, request: &TripRequest, now: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE trips
            SET customer_id = $2, truck_id = $3, driver_id = $4, origin = $5, destination = $6,
                scheduled_date = $7, distance = $8, fuel_cost = $9, other_costs = $10,
                notes = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.customer_id)
        .bind(request.truck_id)
        .bind(request.driver_id)
        .bind(request.origin.trim())
        .bind(request.destination.trim())
        .bind(request.scheduled_date)
        .bind(request.distance)
        .bind(request.fuel_cost)
        .bind(request.other_costs)
        .bind(&request.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Aplica la transición sobre la fila bloqueada (`FOR UPDATE`) y la
    /// persiste en la misma transacción. Devuelve el estado anterior y el
    /// viaje actualizado, o `None` si no existe.
    pub async fn transition_status(
        &self,
        id: Uuid,
        status: TripStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<(TripStatus, Trip)>, AppError> {
        let mut tx = self.pool.begin().await?;

        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut trip) = trip else {
            return Ok(None);
        };

        let previous = trip.status;
        trip.transition_to(status, now);

        sqlx::query(
            r#"
            UPDATE trips
            SET status = $2, actual_start_date = $3, actual_end_date = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(trip.id)
        .bind(trip.status)
        .bind(trip.actual_start_date)
        .bind(trip.actual_end_date)
        .bind(trip.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some((previous, trip)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
