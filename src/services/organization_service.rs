use crate::dto::organization_dto::{
    BranchListQuery, CreateBranchPayload, CreateEmployeePayload, CreateRegionPayload,
    EmployeeListQuery, RegionListQuery, UpdateBranchPayload, UpdateEmployeePayload,
    UpdateRegionPayload,
};
use crate::error::{Error, Result};
use crate::models::{branch::Branch, employee::Employee, region::Region};
use sqlx::PgPool;

const BRANCH_COLUMNS: &str = "id, nome, endereco, telefone, criado_em, atualizado_em, id_regional";
const EMPLOYEE_COLUMNS: &str = "id, user_id, agencia_id, centro_custo, cargo";

/// Regions, branches and employees. Deletes are physical.
#[derive(Clone)]
pub struct OrganizationService {
    pool: PgPool,
}

impl OrganizationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_region(&self, payload: CreateRegionPayload) -> Result<Region> {
        let region = sqlx::query_as::<_, Region>(
            r#"
            INSERT INTO regionais (nome, descricao)
            VALUES ($1, $2)
            RETURNING id, nome, descricao
            "#,
        )
        .bind(payload.nome)
        .bind(payload.descricao)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(region_id = region.id, "Region created");
        Ok(region)
    }

    pub async fn list_regions(&self, query: RegionListQuery) -> Result<Vec<Region>> {
        let items = sqlx::query_as::<_, Region>(
            "SELECT id, nome, descricao FROM regionais ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(query.limit.max(0))
        .bind(query.skip.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get_region(&self, id: i64) -> Result<Region> {
        sqlx::query_as::<_, Region>("SELECT id, nome, descricao FROM regionais WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Regional não encontrada".to_string()))
    }

    pub async fn update_region(&self, id: i64, payload: UpdateRegionPayload) -> Result<Region> {
        if payload.is_empty() {
            return self.get_region(id).await;
        }

        let clear_description = payload.descricao.is_null();
        let region = sqlx::query_as::<_, Region>(
            r#"
            UPDATE regionais
            SET
                nome = COALESCE($2, nome),
                descricao = CASE WHEN $4 THEN NULL ELSE COALESCE($3, descricao) END
            WHERE id = $1
            RETURNING id, nome, descricao
            "#,
        )
        .bind(id)
        .bind(payload.nome.into_value())
        .bind(payload.descricao.into_value())
        .bind(clear_description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Regional não encontrada".to_string()))?;

        tracing::info!(region_id = region.id, "Region updated");
        Ok(region)
    }

    pub async fn delete_region(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM regionais WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Regional não encontrada".to_string()));
        }
        tracing::info!(region_id = id, "Region deleted");
        Ok(())
    }

    pub async fn create_branch(&self, payload: CreateBranchPayload) -> Result<Branch> {
        let branch = sqlx::query_as::<_, Branch>(&format!(
            r#"
            INSERT INTO agencias (nome, endereco, telefone, id_regional)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BRANCH_COLUMNS
        ))
        .bind(payload.nome)
        .bind(payload.endereco)
        .bind(payload.telefone)
        .bind(payload.id_regional)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(branch_id = branch.id, region_id = branch.id_regional, "Branch created");
        Ok(branch)
    }

    pub async fn list_branches(&self, query: BranchListQuery) -> Result<Vec<Branch>> {
        let items = sqlx::query_as::<_, Branch>(&format!(
            r#"
            SELECT {}
            FROM agencias
            WHERE ($1::BIGINT IS NULL OR id_regional = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            BRANCH_COLUMNS
        ))
        .bind(query.id_regional)
        .bind(query.limit.max(0))
        .bind(query.skip.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get_branch(&self, id: i64) -> Result<Branch> {
        sqlx::query_as::<_, Branch>(&format!(
            "SELECT {} FROM agencias WHERE id = $1",
            BRANCH_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Agência não encontrada".to_string()))
    }

    pub async fn update_branch(&self, id: i64, payload: UpdateBranchPayload) -> Result<Branch> {
        if payload.is_empty() {
            return self.get_branch(id).await;
        }

        let branch = sqlx::query_as::<_, Branch>(&format!(
            r#"
            UPDATE agencias
            SET
                nome = COALESCE($2, nome),
                endereco = COALESCE($3, endereco),
                telefone = COALESCE($4, telefone),
                id_regional = COALESCE($5, id_regional),
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BRANCH_COLUMNS
        ))
        .bind(id)
        .bind(payload.nome.into_value())
        .bind(payload.endereco.into_value())
        .bind(payload.telefone.into_value())
        .bind(payload.id_regional.into_value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Agência não encontrada".to_string()))?;

        tracing::info!(branch_id = branch.id, "Branch updated");
        Ok(branch)
    }

    pub async fn delete_branch(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM agencias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Agência não encontrada".to_string()));
        }
        tracing::info!(branch_id = id, "Branch deleted");
        Ok(())
    }

    pub async fn create_employee(&self, payload: CreateEmployeePayload) -> Result<Employee> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO colaboradores (user_id, agencia_id, centro_custo, cargo)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(payload.user_id)
        .bind(payload.agencia_id)
        .bind(payload.centro_custo)
        .bind(payload.cargo)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            employee_id = employee.id,
            user_id = employee.user_id,
            branch_id = employee.agencia_id,
            "Employee created"
        );
        Ok(employee)
    }

    pub async fn list_employees(&self, query: EmployeeListQuery) -> Result<Vec<Employee>> {
        let items = sqlx::query_as::<_, Employee>(&format!(
            r#"
            SELECT {}
            FROM colaboradores
            WHERE ($1::BIGINT IS NULL OR agencia_id = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(query.agencia_id)
        .bind(query.limit.max(0))
        .bind(query.skip.max(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee> {
        sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM colaboradores WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Colaborador não encontrado".to_string()))
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: UpdateEmployeePayload,
    ) -> Result<Employee> {
        if payload.is_empty() {
            return self.get_employee(id).await;
        }

        let employee = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE colaboradores
            SET
                agencia_id = COALESCE($2, agencia_id),
                centro_custo = COALESCE($3, centro_custo),
                cargo = COALESCE($4, cargo)
            WHERE id = $1
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .bind(payload.agencia_id.into_value())
        .bind(payload.centro_custo.into_value())
        .bind(payload.cargo.into_value())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Colaborador não encontrado".to_string()))?;

        tracing::info!(employee_id = employee.id, "Employee updated");
        Ok(employee)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM colaboradores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Colaborador não encontrado".to_string()));
        }
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}
