//! SQL implementation of the shipment repository
//!
//! Table and column names are the ERP's (`Envios`, `trkpaqmovs`, `Sucursales`,
//! `Clientes`); every selected column is aliased to snake_case so the row
//! lookups do not depend on how a backend folds identifier case.

use crate::conversions::{format_date, format_time, format_timestamp, placeholders};
use crate::error::DbError;
use crate::repositories::shipment::{
    Branch, Customer, MovementEvent, ShipmentRecord, ShipmentRepository,
};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use std::collections::HashMap;
use tracing::{debug, error, warn};

const SHIPMENT_QUERY: &str = r#"
    SELECT
        CAST(e.EnvioID AS BIGINT)           AS envio_id,
        CAST(e.Estado AS TEXT)              AS estado,
        CAST(e.ClienteIDOrigen AS BIGINT)   AS cliente_id_origen,
        CAST(e.ClienteIDDestino AS BIGINT)  AS cliente_id_destino,
        CAST(e.SucursalIDOrigen AS BIGINT)  AS sucursal_id_origen,
        CAST(e.SucursalIDDestino AS BIGINT) AS sucursal_id_destino,
        e.LocalidadOrigen                   AS localidad_origen,
        e.LocalidadDestino                  AS localidad_destino,
        e.DomicilioDestino                  AS domicilio_destino,
        CAST(e.CodigoPostalDestino AS TEXT) AS codigo_postal_destino,
        CAST(e.SucursalIDEmision AS BIGINT) AS sucursal_id_emision,
        CAST(e.FechaRecepcion AS TEXT)      AS fecha_recepcion,
        CAST(e.HoraRecepcion AS TEXT)       AS hora_recepcion,
        CAST(e.Bultos AS BIGINT)            AS bultos,
        so.SucursalNombre                   AS sucursal_origen_nombre,
        sd.SucursalNombre                   AS sucursal_destino_nombre,
        se.SucursalNombre                   AS sucursal_emision_nombre
    FROM Envios e
    LEFT JOIN Sucursales so ON so.SucursalID = e.SucursalIDOrigen
    LEFT JOIN Sucursales sd ON sd.SucursalID = e.SucursalIDDestino
    LEFT JOIN Sucursales se ON se.SucursalID = e.SucursalIDEmision
    WHERE e.EnvioID = $1
    LIMIT 1
"#;

const MOVEMENTS_QUERY: &str = r#"
    SELECT
        CAST(m.updated_at AS TEXT)          AS updated_at,
        CAST(m.EnvioID AS BIGINT)           AS envio_id,
        CAST(m.SucursalIDDestino AS BIGINT) AS sucursal_id_destino,
        CAST(m.SucursalIDActual AS BIGINT)  AS sucursal_id_actual,
        sa.SucursalNombre                   AS sucursal_actual_nombre,
        sd.SucursalNombre                   AS sucursal_destino_nombre,
        CAST(m.operacion AS TEXT)           AS operacion,
        CAST(m.Estado AS TEXT)              AS estado
    FROM trkpaqmovs m
    LEFT JOIN Sucursales sa ON sa.SucursalID = m.SucursalIDActual
    LEFT JOIN Sucursales sd ON sd.SucursalID = m.SucursalIDDestino
    WHERE m.EnvioID = $1
    ORDER BY m.updated_at DESC
"#;

/// A nullable column; an undecodable value is logged and read as NULL
fn opt_column<T>(row: &AnyRow, column: &str) -> Option<T>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Any> + sqlx::Type<sqlx::Any>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unreadable ERP column {}, treating it as empty: {}", column, e);
            None
        }
    }
}

fn opt_i64(row: &AnyRow, column: &str) -> Option<i64> {
    opt_column(row, column)
}

fn opt_string(row: &AnyRow, column: &str) -> Option<String> {
    opt_column(row, column)
}

fn shipment_from_row(row: &AnyRow) -> Result<ShipmentRecord, DbError> {
    let id: i64 = row.try_get("envio_id")?;
    Ok(ShipmentRecord {
        id,
        status: opt_string(row, "estado"),
        origin_customer_id: opt_i64(row, "cliente_id_origen"),
        destination_customer_id: opt_i64(row, "cliente_id_destino"),
        origin_branch_id: opt_i64(row, "sucursal_id_origen"),
        destination_branch_id: opt_i64(row, "sucursal_id_destino"),
        origin_locality: opt_string(row, "localidad_origen"),
        destination_locality: opt_string(row, "localidad_destino"),
        destination_address: opt_string(row, "domicilio_destino"),
        destination_postal_code: opt_string(row, "codigo_postal_destino"),
        issuing_branch_id: opt_i64(row, "sucursal_id_emision"),
        received_date: format_date(opt_string(row, "fecha_recepcion").as_deref()),
        received_time: format_time(opt_string(row, "hora_recepcion").as_deref()),
        parcels: opt_i64(row, "bultos"),
        origin_branch_name: opt_string(row, "sucursal_origen_nombre"),
        destination_branch_name: opt_string(row, "sucursal_destino_nombre"),
        issuing_branch_name: opt_string(row, "sucursal_emision_nombre"),
    })
}

fn movement_from_row(row: &AnyRow) -> Result<MovementEvent, DbError> {
    let shipment_id: i64 = row.try_get("envio_id")?;
    Ok(MovementEvent {
        updated_at: format_timestamp(opt_string(row, "updated_at").as_deref()),
        shipment_id,
        destination_branch_id: opt_i64(row, "sucursal_id_destino"),
        current_branch_id: opt_i64(row, "sucursal_id_actual"),
        current_branch_name: opt_string(row, "sucursal_actual_nombre"),
        destination_branch_name: opt_string(row, "sucursal_destino_nombre"),
        operation: opt_string(row, "operacion"),
        status: opt_string(row, "estado"),
    })
}

/// SQL implementation of the shipment repository
#[derive(Debug, Clone)]
pub struct SqlShipmentRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlShipmentRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    async fn fetch_by_ids(&self, sql: &str, ids: &[i64]) -> Result<Vec<AnyRow>, DbError> {
        let mut query = sqlx::query(sql);
        for id in ids {
            query = query.bind(*id);
        }
        query
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed batched lookup: {}", e);
                DbError::QueryError(e.to_string())
            })
    }
}

impl ShipmentRepository for SqlShipmentRepository {
    async fn fetch_shipment(&self, shipment_id: i64) -> Result<Option<ShipmentRecord>, DbError> {
        debug!("Fetching shipment {}", shipment_id);

        let row = sqlx::query(SHIPMENT_QUERY)
            .bind(shipment_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to fetch shipment {}: {}", shipment_id, e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(shipment_from_row).transpose()
    }

    async fn fetch_movements(&self, shipment_id: i64) -> Result<Vec<MovementEvent>, DbError> {
        debug!("Fetching movements for shipment {}", shipment_id);

        let rows = sqlx::query(MOVEMENTS_QUERY)
            .bind(shipment_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to fetch movements for shipment {}: {}", shipment_id, e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(movement_from_row).collect()
    }

    async fn fetch_customers_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Customer>, DbError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        debug!("Fetching {} customers", ids.len());

        let sql = format!(
            "SELECT CAST(ClienteID AS BIGINT) AS cliente_id, ClienteNombre AS cliente_nombre \
             FROM Clientes WHERE ClienteID IN ({})",
            placeholders(1, ids.len())
        );
        let rows = self.fetch_by_ids(&sql, ids).await?;

        let mut customers = HashMap::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.try_get("cliente_id")?;
            customers.insert(
                id,
                Customer {
                    id,
                    name: opt_string(row, "cliente_nombre"),
                },
            );
        }
        Ok(customers)
    }

    async fn fetch_branches_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Branch>, DbError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        debug!("Fetching {} branches", ids.len());

        let sql = format!(
            "SELECT CAST(SucursalID AS BIGINT) AS sucursal_id, SucursalNombre AS sucursal_nombre, \
             Domicilio AS domicilio FROM Sucursales WHERE SucursalID IN ({})",
            placeholders(1, ids.len())
        );
        let rows = self.fetch_by_ids(&sql, ids).await?;

        let mut branches = HashMap::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.try_get("sucursal_id")?;
            branches.insert(
                id,
                Branch {
                    id,
                    name: opt_string(row, "sucursal_nombre"),
                    address: opt_string(row, "domicilio"),
                },
            );
        }
        Ok(branches)
    }
}
