//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod grade_records;
mod lesson_plans;
mod materials;
mod profiles;
mod submissions;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url, &config.database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_connection(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（文件库启用 WAL + pragma 优化；内存库只用单连接）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool = SqlitePoolOptions::new()
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));

        pool = if in_memory {
            pool.max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            pool.max_connections(config.pool_size)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, NewAssignment},
    },
    grades::{
        entities::GradeRecord,
        requests::{GradeListQuery, GradeRecordDraft, SubmissionGrade},
        responses::GradeListResponse,
    },
    lesson_plans::{
        entities::LessonPlan,
        requests::{LessonPlanListQuery, NewLessonPlan},
    },
    materials::{
        entities::Material,
        requests::{MaterialListQuery, NewMaterial},
    },
    profiles::{entities::Profile, requests::ProfileUpsert},
    submissions::{
        entities::Submission, requests::NewSubmission, responses::GradeSubmissionResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户资料模块
    async fn upsert_profile(&self, profile: ProfileUpsert, at: DateTime<Utc>) -> Result<Profile> {
        self.upsert_profile_impl(profile, at).await
    }

    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>> {
        self.get_profile_by_id_impl(id).await
    }

    async fn list_profiles_by_ids(&self, ids: &[i64]) -> Result<Vec<Profile>> {
        self.list_profiles_by_ids_impl(ids).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(query).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn count_submissions_by_assignment_ids(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        self.count_submissions_by_assignment_ids_impl(assignment_ids)
            .await
    }

    // 提交模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn find_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.find_submission_impl(assignment_id, student_id).await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<(Submission, Option<Profile>)>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id, assignment_ids)
            .await
    }

    async fn set_submission_reviewed(
        &self,
        id: i64,
        reviewed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Submission>> {
        self.set_submission_reviewed_impl(id, reviewed_at).await
    }

    // 成绩模块
    async fn apply_submission_grade(
        &self,
        grade: SubmissionGrade,
    ) -> Result<GradeSubmissionResponse> {
        self.apply_submission_grade_impl(grade).await
    }

    async fn create_grade_record(&self, draft: GradeRecordDraft) -> Result<GradeRecord> {
        self.create_grade_record_impl(draft).await
    }

    async fn list_grade_records(&self, query: GradeListQuery) -> Result<GradeListResponse> {
        self.list_grade_records_impl(query).await
    }

    // 学习材料模块
    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials(&self, query: MaterialListQuery) -> Result<Vec<Material>> {
        self.list_materials_impl(query).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 教学文档模块
    async fn create_lesson_plan(&self, plan: NewLessonPlan) -> Result<LessonPlan> {
        self.create_lesson_plan_impl(plan).await
    }

    async fn get_lesson_plan_by_id(&self, id: i64) -> Result<Option<LessonPlan>> {
        self.get_lesson_plan_by_id_impl(id).await
    }

    async fn list_lesson_plans(&self, query: LessonPlanListQuery) -> Result<Vec<LessonPlan>> {
        self.list_lesson_plans_impl(query).await
    }

    async fn delete_lesson_plan(&self, id: i64) -> Result<bool> {
        self.delete_lesson_plan_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::GradeRecordKey;
    use crate::models::profiles::entities::UserRole;
    use crate::models::school::{Category, Mapel, Semester};
    use crate::test_support::at;

    const T0: i64 = 1_767_225_600;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", &DatabaseConfig::default())
            .await
            .unwrap()
    }

    fn profile(id: i64, nama: &str, role: UserRole, nama_kelas: Option<&str>) -> ProfileUpsert {
        ProfileUpsert {
            id,
            nama: nama.to_string(),
            role,
            tingkat: nama_kelas.map(|_| 10),
            nama_kelas: nama_kelas.map(|k| k.to_string()),
            nis: None,
            nip: None,
        }
    }

    fn new_assignment(judul: &str, deadline: i64) -> NewAssignment {
        NewAssignment {
            judul: judul.to_string(),
            deskripsi: None,
            file_url: None,
            file_name: None,
            tingkat: 10,
            nama_kelas: "X 1".to_string(),
            mapel: Mapel::Sejarah,
            semester: Semester::Ganjil,
            kategori: Category::Tugas,
            tp: Some("TP1".to_string()),
            deadline: at(deadline),
            created_by: 1,
            created_at: at(T0),
        }
    }

    fn new_submission(assignment_id: i64, student_id: i64, secs: i64) -> NewSubmission {
        NewSubmission {
            assignment_id,
            student_id,
            file_url: Some("/api/v1/files/submissions/x.pdf".to_string()),
            file_name: Some("x.pdf".to_string()),
            catatan: None,
            submitted_at: at(secs),
        }
    }

    fn draft(student_id: i64, judul: &str, nilai: i32, secs: i64) -> GradeRecordDraft {
        GradeRecordDraft {
            key: GradeRecordKey {
                student_id,
                judul: judul.to_string(),
                kategori: Category::Tugas,
                mapel: Mapel::Sejarah,
                semester: Semester::Ganjil,
            },
            tingkat: 10,
            nama_kelas: "X 1".to_string(),
            tp: Some("TP1".to_string()),
            nilai,
            keterangan: Some(format!("Nilai tugas: {judul}")),
            created_by: 1,
            at: at(secs),
        }
    }

    // 教师 1，学生 20 与 21，一份作业
    async fn seeded() -> (SeaOrmStorage, Assignment) {
        let storage = memory_storage().await;
        storage
            .upsert_profile(profile(1, "Pak Hadi", UserRole::Guru, None), at(T0))
            .await
            .unwrap();
        storage
            .upsert_profile(profile(20, "Budi", UserRole::Siswa, Some("X 1")), at(T0))
            .await
            .unwrap();
        storage
            .upsert_profile(profile(21, "Ani", UserRole::Siswa, Some("X 1")), at(T0))
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(new_assignment("Proklamasi", T0 + 3600))
            .await
            .unwrap();
        (storage, assignment)
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("lms.db").unwrap(),
            "sqlite://lms.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u@h/db").is_ok());
        assert!(matches!(
            SeaOrmStorage::build_database_url("redis://x"),
            Err(LmsError::DatabaseConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_profile_upsert_keeps_created_at() {
        let storage = memory_storage().await;
        let first = storage
            .upsert_profile(profile(5, "Siti", UserRole::Siswa, Some("X 2")), at(T0))
            .await
            .unwrap();
        let second = storage
            .upsert_profile(
                profile(5, "Siti Aminah", UserRole::Siswa, Some("X 3")),
                at(T0 + 60),
            )
            .await
            .unwrap();
        assert_eq!(second.nama, "Siti Aminah");
        assert_eq!(second.nama_kelas.as_deref(), Some("X 3"));
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.updated_at, at(T0 + 60));
        assert!(storage.get_profile_by_id(6).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_validation_error() {
        let (storage, assignment) = seeded().await;
        storage
            .create_submission(new_submission(assignment.id, 20, T0 + 10))
            .await
            .unwrap();
        let err = storage
            .create_submission(new_submission(assignment.id, 20, T0 + 20))
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_regrade_updates_the_same_record() {
        let (storage, assignment) = seeded().await;
        let submission = storage
            .create_submission(new_submission(assignment.id, 20, T0 + 10))
            .await
            .unwrap();

        let first = storage
            .apply_submission_grade(SubmissionGrade {
                submission_id: submission.id,
                value: 77,
                reviewed_at: at(T0 + 100),
                record: draft(20, "Proklamasi", 77, T0 + 100),
            })
            .await
            .unwrap();
        assert!(first.record_created);
        assert!(first.submission.reviewed);
        assert_eq!(first.submission.reviewed_at, Some(at(T0 + 100)));

        let second = storage
            .apply_submission_grade(SubmissionGrade {
                submission_id: submission.id,
                value: 82,
                reviewed_at: at(T0 + 200),
                record: draft(20, "Proklamasi", 82, T0 + 200),
            })
            .await
            .unwrap();
        assert!(!second.record_created);
        assert_eq!(second.grade_record.id, first.grade_record.id);
        assert_eq!(second.grade_record.nilai, 82);
        assert_eq!(second.submission.grade, Some(82));
        // 已有的查看时间保留
        assert_eq!(second.submission.reviewed_at, Some(at(T0 + 100)));

        let all = storage
            .list_grade_records(GradeListQuery {
                student_id: Some(20),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.items.len(), 1);
        assert_eq!(all.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_grade_of_missing_submission_writes_nothing() {
        let (storage, _) = seeded().await;
        let err = storage
            .apply_submission_grade(SubmissionGrade {
                submission_id: 999,
                value: 90,
                reviewed_at: at(T0),
                record: draft(20, "Proklamasi", 90, T0),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
        let all = storage
            .list_grade_records(GradeListQuery::default())
            .await
            .unwrap();
        assert!(all.items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_assignment_removes_its_submissions() {
        let (storage, assignment) = seeded().await;
        let submission = storage
            .create_submission(new_submission(assignment.id, 20, T0 + 10))
            .await
            .unwrap();
        storage
            .create_submission(new_submission(assignment.id, 21, T0 + 20))
            .await
            .unwrap();

        let counts = storage
            .count_submissions_by_assignment_ids(&[assignment.id])
            .await
            .unwrap();
        assert_eq!(counts.get(&assignment.id), Some(&2));

        assert!(storage.delete_assignment(assignment.id).await.unwrap());
        assert!(storage.get_submission_by_id(submission.id).await.unwrap().is_none());
        assert!(!storage.delete_assignment(assignment.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_listing_order() {
        let (storage, first) = seeded().await;
        let earlier = storage
            .create_assignment(new_assignment("Kerajaan Majapahit", T0 + 600))
            .await
            .unwrap();
        let listed = storage
            .list_assignments(AssignmentListQuery::default())
            .await
            .unwrap();
        let ids: Vec<i64> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![earlier.id, first.id]);

        storage
            .create_submission(new_submission(first.id, 21, T0 + 50))
            .await
            .unwrap();
        storage
            .create_submission(new_submission(first.id, 20, T0 + 10))
            .await
            .unwrap();
        let submissions = storage
            .list_submissions_by_assignment(first.id)
            .await
            .unwrap();
        let students: Vec<i64> = submissions.iter().map(|(s, _)| s.student_id).collect();
        assert_eq!(students, vec![20, 21]);
        assert!(submissions.iter().all(|(_, p)| p.is_some()));
    }

    #[tokio::test]
    async fn test_grade_records_paginate_newest_first() {
        let (storage, _) = seeded().await;
        for (i, judul) in ["Kuis 1", "Kuis 2", "Kuis 3"].iter().enumerate() {
            storage
                .create_grade_record(draft(20, judul, 70 + i as i32, T0 + i as i64))
                .await
                .unwrap();
        }

        let page = storage
            .list_grade_records(GradeListQuery {
                page: Some(1),
                size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        let titles: Vec<&str> = page.items.iter().map(|r| r.judul.as_str()).collect();
        assert_eq!(titles, vec!["Kuis 3", "Kuis 2"]);

        let filtered = storage
            .list_grade_records(GradeListQuery {
                student_id: Some(21),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(filtered.items.is_empty());
    }

    #[tokio::test]
    async fn test_subsecond_deadline_round_trips() {
        use crate::clock::FixedClock;
        use crate::grading::GradingWorkflow;
        use crate::models::assignments::requests::CreateAssignmentRequest;
        use crate::models::profiles::entities::Actor;
        use crate::test_support::MemoryBlobStorage;
        use std::sync::Arc;

        let (storage, _) = seeded().await;
        let teacher = storage.get_profile_by_id(1).await.unwrap();
        let student = storage.get_profile_by_id(20).await.unwrap();
        let workflow = GradingWorkflow::new(
            Arc::new(storage.clone()),
            Arc::new(MemoryBlobStorage::default()),
            Arc::new(FixedClock::new(at(T0))),
        );
        let teacher = Actor {
            id: 1,
            role: UserRole::Guru,
            profile: teacher,
        };
        let student = Actor {
            id: 20,
            role: UserRole::Siswa,
            profile: student,
        };
        let request = |deadline| CreateAssignmentRequest {
            judul: "Sumpah Pemuda".to_string(),
            deskripsi: None,
            file_url: None,
            file_name: None,
            tingkat: 10,
            nama_kelas: "X 1".to_string(),
            mapel: Mapel::Sejarah,
            semester: Semester::Ganjil,
            kategori: Category::UlanganHarian,
            tp: None,
            deadline: Some(deadline),
            deadline_days: None,
            deadline_hours: None,
        };

        let err = workflow
            .create_assignment(&teacher, request(at(T0) + chrono::Duration::milliseconds(900)))
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));

        let assignment = workflow
            .create_assignment(&teacher, request(at(T0) + chrono::Duration::milliseconds(1_900)))
            .await
            .unwrap();
        let stored = storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.deadline, at(T0 + 1));
        assert_eq!(stored.deadline, assignment.deadline);

        workflow
            .submit(&student, assignment.id, None, Some("Selesai".to_string()))
            .await
            .unwrap();
    }

    fn new_material(judul: &str, nama_kelas: &str, secs: i64) -> NewMaterial {
        NewMaterial {
            judul: judul.to_string(),
            deskripsi: None,
            file_url: format!("/api/v1/files/materi/1/{secs}_m.pdf"),
            file_name: "m.pdf".to_string(),
            file_path: format!("1/{secs}_m.pdf"),
            tingkat: 10,
            nama_kelas: nama_kelas.to_string(),
            mapel: Mapel::Sejarah,
            semester: Semester::Ganjil,
            created_by: 1,
            created_at: at(secs),
        }
    }

    fn new_lesson_plan(
        tipe: crate::models::lesson_plans::entities::DocumentType,
        tahun_ajaran: &str,
        secs: i64,
    ) -> NewLessonPlan {
        NewLessonPlan {
            judul: format!("{tipe} {tahun_ajaran}"),
            tipe,
            file_url: format!("/api/v1/files/dokumen/1/{secs}_d.pdf"),
            file_name: "d.pdf".to_string(),
            file_path: format!("1/{secs}_d.pdf"),
            tingkat: 10,
            nama_kelas: None,
            mapel: Mapel::Sejarah,
            semester: Semester::Genap,
            tahun_ajaran: tahun_ajaran.to_string(),
            tp: None,
            created_by: 1,
            created_at: at(secs),
        }
    }

    #[tokio::test]
    async fn test_materials_newest_first_and_delete() {
        let (storage, _) = seeded().await;
        let old = storage
            .create_material(new_material("Zaman Praaksara", "X 1", T0))
            .await
            .unwrap();
        let new = storage
            .create_material(new_material("Kerajaan Kutai", "X 1", T0 + 60))
            .await
            .unwrap();
        storage
            .create_material(new_material("Kerajaan Tarumanegara", "X 2", T0 + 120))
            .await
            .unwrap();

        let listed = storage
            .list_materials(MaterialListQuery {
                nama_kelas: Some("X 1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
        assert_eq!(listed[0].file_path, format!("1/{}_m.pdf", T0 + 60));
        assert_eq!(listed[0].created_at, at(T0 + 60));

        assert!(storage.delete_material(old.id).await.unwrap());
        assert!(storage.get_material_by_id(old.id).await.unwrap().is_none());
        assert!(!storage.delete_material(old.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_lesson_plans_filter_by_type_and_year() {
        use crate::models::lesson_plans::entities::DocumentType;

        let (storage, _) = seeded().await;
        storage
            .create_lesson_plan(new_lesson_plan(DocumentType::Prota, "2025/2026", T0))
            .await
            .unwrap();
        let prosem = storage
            .create_lesson_plan(new_lesson_plan(DocumentType::Prosem, "2025/2026", T0 + 1))
            .await
            .unwrap();
        storage
            .create_lesson_plan(new_lesson_plan(DocumentType::Prosem, "2026/2027", T0 + 2))
            .await
            .unwrap();

        let listed = storage
            .list_lesson_plans(LessonPlanListQuery {
                tipe: Some(DocumentType::Prosem),
                tahun_ajaran: Some("2025/2026".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, prosem.id);
        assert_eq!(listed[0].tipe, DocumentType::Prosem);
        assert_eq!(listed[0].nama_kelas, None);

        let all = storage
            .list_lesson_plans(LessonPlanListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].tahun_ajaran, "2026/2027");

        assert!(storage.delete_lesson_plan(prosem.id).await.unwrap());
        assert!(storage.get_lesson_plan_by_id(prosem.id).await.unwrap().is_none());
    }
}
