use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create staff_members table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff_members (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create staff_services join table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff_services (
            staff_id UUID NOT NULL REFERENCES staff_members(id),
            service_id UUID NOT NULL REFERENCES services(id),
            PRIMARY KEY (staff_id, service_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create staff_schedules table (recurring weekly windows)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff_schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            staff_id UUID NOT NULL REFERENCES staff_members(id),
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            effective_from DATE NULL,
            effective_until DATE NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_time_window CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_exceptions table (per-date overrides)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_exceptions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            staff_id UUID NOT NULL REFERENCES staff_members(id),
            exception_date DATE NOT NULL,
            is_available BOOLEAN NOT NULL,
            start_time TIME NULL,
            end_time TIME NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT scoped_exception_window CHECK (
                (start_time IS NULL AND end_time IS NULL)
                OR (start_time IS NOT NULL AND end_time IS NOT NULL AND end_time > start_time)
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create vacations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vacations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            staff_id UUID NOT NULL REFERENCES staff_members(id),
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            is_approved BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_vacation_range CHECK (end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            staff_id UUID NOT NULL REFERENCES staff_members(id),
            service_id UUID NOT NULL REFERENCES services(id),
            customer_name VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(50) NULL,
            customer_email VARCHAR(255) NULL,
            appointment_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_appointment_window CHECK (end_time > start_time),
            CONSTRAINT known_status CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_staff_services_service_id ON staff_services(service_id);
        CREATE INDEX IF NOT EXISTS idx_staff_schedules_staff_id ON staff_schedules(staff_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_exceptions_staff_date ON schedule_exceptions(staff_id, exception_date);
        CREATE INDEX IF NOT EXISTS idx_vacations_staff_id ON vacations(staff_id);
        CREATE INDEX IF NOT EXISTS idx_vacations_dates ON vacations(start_date, end_date);
        CREATE INDEX IF NOT EXISTS idx_appointments_staff_date ON appointments(staff_id, appointment_date);
        CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
