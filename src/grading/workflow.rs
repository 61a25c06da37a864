//! 作业、提交与成绩的业务流程
//!
//! 所有校验都在写入之前完成；被拒绝的请求不会产生任何存储或文件写入。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::aggregator::build_recap;
use super::lifecycle::{countdown_label, resolve_deadline, state_at};
use crate::blob::{self, BlobStorage};
use crate::clock::Clock;
use crate::errors::{LmsError, Result};
use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentState},
        requests::{AssignmentListParams, AssignmentListQuery, CreateAssignmentRequest, NewAssignment},
        responses::{StudentAssignmentItem, TeacherAssignmentItem},
    },
    grades::{
        entities::{GradeRecord, GradeRecordKey},
        requests::{CreateGradeRequest, GradeListParams, GradeListQuery, GradeRecordDraft, RecapParams, SubmissionGrade},
        responses::{GradeListResponse, GradedItem, RecapRow, StudentGradeSummary},
    },
    profiles::{
        entities::{Actor, Profile, StudentIdentity, UserRole},
        requests::{ProfileUpsert, UpdateProfileRequest},
    },
    school::{
        CONFIRMATION_NOTE, Category, GradeBand, Mapel, Semester, SubmissionMode, is_valid_kelas,
        tingkat_from_kelas, tingkat_label,
    },
    submissions::{
        entities::Submission,
        requests::{NewSubmission, SubmissionFile},
        responses::{
            AssignmentSubmissionsResponse, GradeSubmissionResponse, SubmissionGroup,
            SubmissionWithStudent, UNKNOWN_CLASS,
        },
    },
};
use crate::storage::Storage;
use crate::utils::validate::{
    non_empty, normalize_tp, validate_grade_value, validate_judul, validate_nama,
    validate_number_id,
};

/// 评分同步时成绩记录使用的类别
pub const SYNCED_CATEGORY: Category = Category::Tugas;

pub fn synced_keterangan(judul: &str) -> String {
    format!("Nilai tugas: {judul}")
}

pub(super) fn require_teacher(actor: &Actor) -> Result<()> {
    if actor.role != UserRole::Guru {
        return Err(LmsError::authorization("Hanya guru yang dapat melakukan aksi ini"));
    }
    Ok(())
}

pub(super) fn require_student(actor: &Actor) -> Result<()> {
    if actor.role != UserRole::Siswa {
        return Err(LmsError::authorization("Hanya siswa yang dapat melakukan aksi ini"));
    }
    Ok(())
}

/// 业务流程入口，持有存储、文件存储与时钟
#[derive(Clone)]
pub struct GradingWorkflow {
    storage: Arc<dyn Storage>,
    blobs: Arc<dyn BlobStorage>,
    clock: Arc<dyn Clock>,
}

impl GradingWorkflow {
    pub fn new(
        storage: Arc<dyn Storage>,
        blobs: Arc<dyn BlobStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            blobs,
            clock,
        }
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub fn blobs(&self) -> Arc<dyn BlobStorage> {
        self.blobs.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    // 资料优先取自中间件已加载的 actor，其次查存储
    pub(super) async fn actor_profile(&self, actor: &Actor) -> Result<Profile> {
        if let Some(profile) = &actor.profile {
            return Ok(profile.clone());
        }
        self.storage
            .get_profile_by_id(actor.id)
            .await?
            .ok_or_else(|| LmsError::not_found("Profil belum dilengkapi"))
    }

    async fn load_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        self.storage
            .get_assignment_by_id(assignment_id)
            .await?
            .ok_or_else(|| LmsError::not_found(format!("Tugas {assignment_id} tidak ditemukan")))
    }

    async fn load_submission(&self, submission_id: i64) -> Result<Submission> {
        self.storage
            .get_submission_by_id(submission_id)
            .await?
            .ok_or_else(|| {
                LmsError::not_found(format!("Pengumpulan {submission_id} tidak ditemukan"))
            })
    }

    /// 更新当前用户资料；角色取自令牌
    pub async fn update_profile(
        &self,
        actor: &Actor,
        req: UpdateProfileRequest,
    ) -> Result<Profile> {
        validate_nama(&req.nama).map_err(LmsError::validation)?;
        let nis = non_empty(req.nis);
        let nip = non_empty(req.nip);
        for number in nis.iter().chain(nip.iter()) {
            validate_number_id(number).map_err(LmsError::validation)?;
        }

        let nama_kelas = non_empty(req.nama_kelas);
        let tingkat = match (&nama_kelas, req.tingkat) {
            (Some(kelas), None) => Some(tingkat_from_kelas(kelas)),
            (_, tingkat) => tingkat,
        };

        if let Some(tingkat) = tingkat
            && tingkat_label(tingkat).is_none()
        {
            return Err(LmsError::validation(format!("Tingkat {tingkat} tidak dikenal")));
        }
        if let (Some(kelas), Some(tingkat)) = (&nama_kelas, tingkat)
            && !is_valid_kelas(tingkat, kelas)
        {
            return Err(LmsError::validation(format!(
                "Kelas {kelas} tidak sesuai dengan tingkat {tingkat}"
            )));
        }
        if actor.role == UserRole::Siswa && nama_kelas.is_none() {
            return Err(LmsError::validation("Siswa wajib memilih kelas"));
        }

        let profile = self
            .storage
            .upsert_profile(
                ProfileUpsert {
                    id: actor.id,
                    nama: req.nama.trim().to_string(),
                    role: actor.role,
                    tingkat,
                    nama_kelas,
                    nis,
                    nip,
                },
                self.clock.now(),
            )
            .await?;

        info!("Profile {} updated ({})", profile.id, profile.role);
        Ok(profile)
    }

    /// 教师创建作业
    pub async fn create_assignment(
        &self,
        actor: &Actor,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        require_teacher(actor)?;
        // 作业的 created_by 引用资料表
        if actor.profile.is_none() {
            return Err(LmsError::validation("Lengkapi profil terlebih dahulu"));
        }
        let now = self.clock.now();

        validate_judul(&req.judul).map_err(LmsError::validation)?;
        if tingkat_label(req.tingkat).is_none() {
            return Err(LmsError::validation(format!(
                "Tingkat {} tidak dikenal",
                req.tingkat
            )));
        }
        let nama_kelas = req.nama_kelas.trim().to_string();
        if !is_valid_kelas(req.tingkat, &nama_kelas) {
            return Err(LmsError::validation(format!(
                "Kelas {nama_kelas} tidak sesuai dengan tingkat {}",
                req.tingkat
            )));
        }
        if !req.mapel.is_offered_for(req.tingkat) {
            return Err(LmsError::validation(format!(
                "Mapel {} tidak tersedia untuk tingkat {}",
                req.mapel, req.tingkat
            )));
        }
        let tp = normalize_tp(req.tp.as_deref()).map_err(LmsError::validation)?;
        let deadline = resolve_deadline(req.deadline, req.deadline_days, req.deadline_hours, now)?;

        let file_url = non_empty(req.file_url);
        let file_name = non_empty(req.file_name);
        if file_url.is_some() != file_name.is_some() {
            return Err(LmsError::validation(
                "Lampiran harus memiliki URL dan nama file",
            ));
        }

        let assignment = self
            .storage
            .create_assignment(NewAssignment {
                judul: req.judul.trim().to_string(),
                deskripsi: non_empty(req.deskripsi),
                file_url,
                file_name,
                tingkat: req.tingkat,
                nama_kelas,
                mapel: req.mapel,
                semester: req.semester,
                kategori: req.kategori,
                tp,
                deadline,
                created_by: actor.id,
                created_at: now,
            })
            .await?;

        info!(
            "Assignment {} created by {} for {} ({}, {})",
            assignment.id, actor.id, assignment.nama_kelas, assignment.mapel, assignment.kategori
        );
        Ok(assignment)
    }

    /// 教师删除作业，连同其全部提交
    pub async fn delete_assignment(&self, actor: &Actor, assignment_id: i64) -> Result<()> {
        require_teacher(actor)?;
        self.load_assignment(assignment_id).await?;

        if !self.storage.delete_assignment(assignment_id).await? {
            return Err(LmsError::not_found(format!(
                "Tugas {assignment_id} tidak ditemukan"
            )));
        }
        info!("Assignment {} deleted by {}", assignment_id, actor.id);
        Ok(())
    }

    /// 教师视角的作业列表，附带提交数
    pub async fn list_assignments_for_teacher(
        &self,
        actor: &Actor,
        params: AssignmentListParams,
    ) -> Result<Vec<TeacherAssignmentItem>> {
        require_teacher(actor)?;
        let now = self.clock.now();

        let assignments = self
            .storage
            .list_assignments(AssignmentListQuery::from(params))
            .await?;
        let ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let counts = self.storage.count_submissions_by_assignment_ids(&ids).await?;

        Ok(assignments
            .into_iter()
            .map(|assignment| TeacherAssignmentItem {
                state: state_at(assignment.deadline, now),
                submission_count: counts.get(&assignment.id).copied().unwrap_or(0),
                assignment,
            })
            .collect())
    }

    /// 学生视角的作业列表：只包含本班作业，附带自己的提交状态
    pub async fn list_assignments_for_student(
        &self,
        actor: &Actor,
        mapel: Option<Mapel>,
        semester: Option<Semester>,
    ) -> Result<Vec<StudentAssignmentItem>> {
        require_student(actor)?;
        let now = self.clock.now();
        let profile = self.actor_profile(actor).await?;
        let Some(nama_kelas) = profile.nama_kelas.clone() else {
            return Err(LmsError::validation("Siswa wajib memilih kelas"));
        };

        let assignments = self
            .storage
            .list_assignments(AssignmentListQuery {
                tingkat: Some(profile.tingkat.unwrap_or_else(|| tingkat_from_kelas(&nama_kelas))),
                nama_kelas: Some(nama_kelas),
                mapel,
                semester,
                ..Default::default()
            })
            .await?;
        let ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let mut mine: HashMap<i64, Submission> = self
            .storage
            .list_submissions_by_student(actor.id, &ids)
            .await?
            .into_iter()
            .map(|s| (s.assignment_id, s))
            .collect();

        Ok(assignments
            .into_iter()
            .map(|assignment| StudentAssignmentItem {
                state: state_at(assignment.deadline, now),
                countdown: countdown_label(assignment.deadline, now),
                my_submission: mine.remove(&assignment.id),
                assignment,
            })
            .collect())
    }

    /// 学生提交作业
    ///
    /// 截止后（含截止时刻）一律拒绝；每个学生对同一作业只能提交一次。
    pub async fn submit(
        &self,
        actor: &Actor,
        assignment_id: i64,
        file: Option<SubmissionFile>,
        note: Option<String>,
    ) -> Result<Submission> {
        require_student(actor)?;
        let assignment = self.load_assignment(assignment_id).await?;
        let profile = self.actor_profile(actor).await?;

        if profile.nama_kelas.as_deref() != Some(assignment.nama_kelas.as_str()) {
            return Err(LmsError::authorization(
                "Tugas ini bukan untuk kelas Anda",
            ));
        }

        let now = self.clock.now();
        if state_at(assignment.deadline, now) == AssignmentState::Expired {
            debug!(
                "Rejected late submission for assignment {} by {}",
                assignment_id, actor.id
            );
            return Err(LmsError::validation("Waktu pengumpulan sudah habis"));
        }

        let file = file.filter(|f| !f.file_name.trim().is_empty() || !f.bytes.is_empty());
        match (assignment.kategori.submission_mode(), &file) {
            (SubmissionMode::FileRequired, None) => {
                return Err(LmsError::validation("File tugas wajib diunggah"));
            }
            (SubmissionMode::ConfirmationOnly, Some(_)) => {
                return Err(LmsError::validation(format!(
                    "Kategori {} hanya memerlukan konfirmasi, tanpa file",
                    assignment.kategori
                )));
            }
            _ => {}
        }
        if let Some(f) = &file
            && f.bytes.is_empty()
        {
            return Err(LmsError::validation("File kosong"));
        }

        if self
            .storage
            .find_submission(assignment_id, actor.id)
            .await?
            .is_some()
        {
            return Err(LmsError::validation("Tugas ini sudah dikumpulkan"));
        }

        let catatan = if assignment.kategori.is_confirmation_only() {
            Some(CONFIRMATION_NOTE.to_string())
        } else {
            non_empty(note)
        };

        let (stored_path, file_url, file_name) = match file {
            Some(f) => {
                let path = blob::submission_path(actor.id, now.timestamp_millis(), &f.file_name);
                let url = self
                    .blobs
                    .put(blob::SUBMISSION_BUCKET, &path, &f.bytes)
                    .await?;
                (Some(path), Some(url), Some(f.file_name))
            }
            None => (None, None, None),
        };

        let created = self
            .storage
            .create_submission(NewSubmission {
                assignment_id,
                student_id: actor.id,
                file_url,
                file_name,
                catatan,
                submitted_at: now,
            })
            .await;
        let submission = match created {
            Ok(submission) => submission,
            Err(e) => {
                // 提交未落库，已上传的文件随之删除
                if let Some(path) = stored_path
                    && let Err(cleanup) = self.blobs.delete(blob::SUBMISSION_BUCKET, &path).await
                {
                    warn!("Failed to remove orphaned upload {}: {}", path, cleanup);
                }
                return Err(e);
            }
        };

        info!(
            "Submission {} created for assignment {} by {}",
            submission.id, assignment_id, actor.id
        );
        Ok(submission)
    }

    /// 教师标记已查看 / 取消
    pub async fn mark_reviewed(
        &self,
        actor: &Actor,
        submission_id: i64,
        reviewed: bool,
    ) -> Result<Submission> {
        require_teacher(actor)?;
        let reviewed_at = reviewed.then(|| self.clock.now());

        let submission = self
            .storage
            .set_submission_reviewed(submission_id, reviewed_at)
            .await?
            .ok_or_else(|| {
                LmsError::not_found(format!("Pengumpulan {submission_id} tidak ditemukan"))
            })?;

        info!(
            "Submission {} marked reviewed={} by {}",
            submission_id, reviewed, actor.id
        );
        Ok(submission)
    }

    /// 教师评分，并同步到成绩记录
    pub async fn grade(
        &self,
        actor: &Actor,
        submission_id: i64,
        value: f64,
    ) -> Result<GradeSubmissionResponse> {
        require_teacher(actor)?;
        let value = validate_grade_value(value).map_err(LmsError::validation)?;

        let submission = self.load_submission(submission_id).await?;
        let assignment = self.load_assignment(submission.assignment_id).await?;
        let student = self.storage.get_profile_by_id(submission.student_id).await?;

        let now = self.clock.now();
        let nama_kelas = student
            .and_then(|p| p.nama_kelas)
            .unwrap_or_else(|| assignment.nama_kelas.clone());

        let result = self
            .storage
            .apply_submission_grade(SubmissionGrade {
                submission_id,
                value,
                reviewed_at: now,
                record: GradeRecordDraft {
                    key: GradeRecordKey {
                        student_id: submission.student_id,
                        judul: assignment.judul.clone(),
                        kategori: SYNCED_CATEGORY,
                        mapel: assignment.mapel,
                        semester: assignment.semester,
                    },
                    tingkat: assignment.tingkat,
                    nama_kelas,
                    tp: assignment.tp.clone(),
                    nilai: value,
                    keterangan: Some(synced_keterangan(&assignment.judul)),
                    created_by: actor.id,
                    at: now,
                },
            })
            .await?;

        info!(
            "Submission {} graded {} by {} (grade record {} {})",
            submission_id,
            value,
            actor.id,
            result.grade_record.id,
            if result.record_created { "created" } else { "updated" }
        );
        Ok(result)
    }

    /// 教师查看某作业的全部提交，按班级分组，组内按提交时间升序
    pub async fn assignment_submissions(
        &self,
        actor: &Actor,
        assignment_id: i64,
    ) -> Result<AssignmentSubmissionsResponse> {
        require_teacher(actor)?;
        let assignment = self.load_assignment(assignment_id).await?;
        let rows = self
            .storage
            .list_submissions_by_assignment(assignment_id)
            .await?;
        let total = rows.len() as i64;

        let mut groups: Vec<SubmissionGroup> = Vec::new();
        for (submission, profile) in rows {
            let student = match &profile {
                Some(p) => StudentIdentity::from(p),
                None => StudentIdentity {
                    id: submission.student_id,
                    nama: super::aggregator::UNKNOWN_STUDENT.to_string(),
                    nis: None,
                    nama_kelas: None,
                },
            };
            let kelas = student
                .nama_kelas
                .clone()
                .filter(|k| !k.is_empty())
                .unwrap_or_else(|| UNKNOWN_CLASS.to_string());

            let item = SubmissionWithStudent {
                submission,
                student,
            };
            match groups.iter_mut().find(|g| g.nama_kelas == kelas) {
                Some(group) => group.submissions.push(item),
                None => groups.push(SubmissionGroup {
                    nama_kelas: kelas,
                    submissions: vec![item],
                }),
            }
        }

        Ok(AssignmentSubmissionsResponse {
            assignment,
            total,
            groups,
        })
    }

    /// 教师直接录入成绩
    pub async fn record_grade(
        &self,
        actor: &Actor,
        req: CreateGradeRequest,
    ) -> Result<GradeRecord> {
        require_teacher(actor)?;
        let nilai = validate_grade_value(req.nilai).map_err(LmsError::validation)?;
        validate_judul(&req.judul).map_err(LmsError::validation)?;
        let tp = normalize_tp(req.tp.as_deref()).map_err(LmsError::validation)?;

        let student = self
            .storage
            .get_profile_by_id(req.student_id)
            .await?
            .filter(|p| p.role == UserRole::Siswa)
            .ok_or_else(|| LmsError::not_found(format!("Siswa {} tidak ditemukan", req.student_id)))?;
        let Some(nama_kelas) = student.nama_kelas.clone() else {
            return Err(LmsError::validation("Siswa belum memiliki kelas"));
        };
        let tingkat = student
            .tingkat
            .unwrap_or_else(|| tingkat_from_kelas(&nama_kelas));
        if !req.mapel.is_offered_for(tingkat) {
            return Err(LmsError::validation(format!(
                "Mapel {} tidak tersedia untuk tingkat {tingkat}",
                req.mapel
            )));
        }

        let record = self
            .storage
            .create_grade_record(GradeRecordDraft {
                key: GradeRecordKey {
                    student_id: student.id,
                    judul: req.judul.trim().to_string(),
                    kategori: req.kategori,
                    mapel: req.mapel,
                    semester: req.semester,
                },
                tingkat,
                nama_kelas,
                tp,
                nilai,
                keterangan: non_empty(req.keterangan),
                created_by: actor.id,
                at: self.clock.now(),
            })
            .await?;

        info!(
            "Grade record {} ({} {}) recorded for {} by {}",
            record.id, record.kategori, record.nilai, record.student_id, actor.id
        );
        Ok(record)
    }

    /// 成绩历史：教师按条件查询，学生只能看到自己的
    pub async fn grade_history(
        &self,
        actor: &Actor,
        params: GradeListParams,
    ) -> Result<GradeListResponse> {
        let (page, size) = params.pagination().normalized();
        let student_id = match actor.role {
            UserRole::Guru => params.student_id,
            UserRole::Siswa => Some(actor.id),
        };

        self.storage
            .list_grade_records(GradeListQuery {
                page: Some(page),
                size: Some(size),
                tingkat: params.tingkat,
                nama_kelas: params.nama_kelas,
                mapel: params.mapel,
                semester: params.semester,
                kategori: params.kategori,
                tp: params.tp,
                student_id,
            })
            .await
    }

    /// 成绩汇总表
    pub async fn recap(&self, actor: &Actor, params: RecapParams) -> Result<Vec<RecapRow>> {
        require_teacher(actor)?;
        if tingkat_label(params.tingkat).is_none() {
            return Err(LmsError::validation(format!(
                "Tingkat {} tidak dikenal",
                params.tingkat
            )));
        }
        normalize_tp(params.tp.as_deref()).map_err(LmsError::validation)?;

        let records = self
            .storage
            .list_grade_records(GradeListQuery::from(&params))
            .await?
            .items;

        let student_ids: Vec<i64> = records
            .iter()
            .map(|r| r.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let profiles: HashMap<i64, Profile> = self
            .storage
            .list_profiles_by_ids(&student_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(build_recap(&records, &profiles))
    }

    /// 学生成绩概览：数量、平均、最高、最低，以及每项的等级
    pub async fn student_summary(
        &self,
        actor: &Actor,
        mapel: Option<Mapel>,
        semester: Option<Semester>,
    ) -> Result<StudentGradeSummary> {
        require_student(actor)?;

        let records = self
            .storage
            .list_grade_records(GradeListQuery {
                student_id: Some(actor.id),
                mapel,
                semester,
                ..Default::default()
            })
            .await?
            .items;

        let count = records.len() as i64;
        let average = if records.is_empty() {
            None
        } else {
            Some(records.iter().map(|r| f64::from(r.nilai)).sum::<f64>() / count as f64)
        };
        let highest = records.iter().map(|r| r.nilai).max();
        let lowest = records.iter().map(|r| r.nilai).min();

        let items = records
            .into_iter()
            .map(|record| {
                let band = GradeBand::of(record.nilai);
                GradedItem {
                    record,
                    band,
                    feedback: band.feedback().to_string(),
                }
            })
            .collect();

        Ok(StudentGradeSummary {
            count,
            average,
            highest,
            lowest,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use chrono::Duration;

    fn pdf() -> Option<SubmissionFile> {
        Some(SubmissionFile {
            file_name: "tugas.pdf".to_string(),
            bytes: b"%PDF-1.4 test".to_vec(),
        })
    }

    #[tokio::test]
    async fn test_submit_then_grade_then_regrade_updates_one_record() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;

        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), Some("selesai".to_string()))
            .await
            .unwrap();
        assert!(!submission.reviewed);
        assert_eq!(submission.grade, None);
        assert!(submission.file_url.is_some());

        let first = fx.workflow.grade(&fx.teacher, submission.id, 77.0).await.unwrap();
        assert!(first.record_created);
        assert_eq!(first.grade_record.nilai, 77);
        assert_eq!(first.grade_record.kategori, Category::Tugas);
        assert_eq!(
            first.grade_record.keterangan.as_deref(),
            Some("Nilai tugas: Proklamasi Kemerdekaan")
        );

        let second = fx.workflow.grade(&fx.teacher, submission.id, 82.0).await.unwrap();
        assert!(!second.record_created);
        assert_eq!(second.grade_record.id, first.grade_record.id);
        assert_eq!(second.grade_record.nilai, 82);

        let records = fx.storage.grade_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].nilai, 82);
    }

    #[tokio::test]
    async fn test_grade_rejects_out_of_range_and_fractional() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();

        for bad in [-1.0, 101.0, 85.5, f64::NAN] {
            let err = fx
                .workflow
                .grade(&fx.teacher, submission.id, bad)
                .await
                .unwrap_err();
            assert!(matches!(err, LmsError::Validation(_)), "{bad} accepted");
        }
        assert!(fx.storage.grade_records().is_empty());
        let stored = fx.storage.submission(submission.id).unwrap();
        assert_eq!(stored.grade, None);
        assert!(!stored.reviewed);

        assert!(fx.workflow.grade(&fx.teacher, submission.id, 0.0).await.is_ok());
        assert!(fx.workflow.grade(&fx.teacher, submission.id, 100.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_after_deadline_fails_for_every_category() {
        for kategori in Category::ALL {
            let fx = Fixture::new().await;
            let assignment = fx.assignment(kategori, Duration::hours(1)).await;
            fx.clock.advance(Duration::hours(2));

            let file = if kategori.is_confirmation_only() { None } else { pdf() };
            let err = fx
                .workflow
                .submit(&fx.student, assignment.id, file, None)
                .await
                .unwrap_err();
            assert!(matches!(err, LmsError::Validation(_)), "{kategori} accepted");
            assert_eq!(fx.blobs.put_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_submit_exactly_at_deadline_is_rejected() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::UlanganHarian, Duration::hours(1)).await;
        fx.clock.set(assignment.deadline);
        let err = fx
            .workflow
            .submit(&fx.student, assignment.id, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_task_requires_file() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let err = fx
            .workflow
            .submit(&fx.student, assignment.id, None, Some("lupa".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
        assert!(fx.storage.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_daily_quiz_file_is_optional() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::UlanganHarian, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, None, Some("  ".to_string()))
            .await
            .unwrap();
        assert_eq!(submission.file_url, None);
        assert_eq!(submission.catatan, None);
    }

    #[tokio::test]
    async fn test_confirmation_only_submission() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Uas, Duration::hours(1)).await;

        let err = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));

        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, None, Some("abaikan".to_string()))
            .await
            .unwrap();
        assert_eq!(submission.catatan.as_deref(), Some(CONFIRMATION_NOTE));
        assert_eq!(submission.file_url, None);
        assert_eq!(submission.grade, None);
    }

    #[tokio::test]
    async fn test_resubmission_is_rejected() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        fx.workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();
        let err = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
        assert_eq!(fx.storage.submissions().len(), 1);
        assert_eq!(fx.blobs.put_count(), 1);
    }

    #[tokio::test]
    async fn test_role_checks() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;

        let err = fx
            .workflow
            .submit(&fx.teacher, assignment.id, pdf(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Authorization(_)));

        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();
        let err = fx
            .workflow
            .grade(&fx.student, submission.id, 100.0)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Authorization(_)));
        let err = fx
            .workflow
            .mark_reviewed(&fx.student, submission.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_other_class_cannot_submit() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let outsider = fx.add_student(30, "Dewi", "X 2").await;
        let err = fx
            .workflow
            .submit(&outsider, assignment.id, pdf(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_missing_references_are_not_found() {
        let fx = Fixture::new().await;
        let err = fx.workflow.submit(&fx.student, 999, pdf(), None).await.unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
        let err = fx.workflow.grade(&fx.teacher, 999, 80.0).await.unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
        let err = fx
            .workflow
            .mark_reviewed(&fx.teacher, 999, true)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));

        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let ghost = Actor {
            id: 404,
            role: UserRole::Siswa,
            profile: None,
        };
        let err = fx
            .workflow
            .submit(&ghost, assignment.id, pdf(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mark_reviewed_sets_and_clears_timestamp() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::UlanganHarian, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, None, None)
            .await
            .unwrap();

        let reviewed = fx
            .workflow
            .mark_reviewed(&fx.teacher, submission.id, true)
            .await
            .unwrap();
        assert!(reviewed.reviewed);
        assert_eq!(reviewed.reviewed_at, Some(fx.clock.now()));

        let again = fx
            .workflow
            .mark_reviewed(&fx.teacher, submission.id, true)
            .await
            .unwrap();
        assert!(again.reviewed);

        let cleared = fx
            .workflow
            .mark_reviewed(&fx.teacher, submission.id, false)
            .await
            .unwrap();
        assert!(!cleared.reviewed);
        assert_eq!(cleared.reviewed_at, None);
    }

    #[tokio::test]
    async fn test_grade_forces_reviewed_and_keeps_existing_timestamp() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();

        let first_look = fx.clock.now();
        fx.workflow
            .mark_reviewed(&fx.teacher, submission.id, true)
            .await
            .unwrap();
        fx.clock.advance(Duration::minutes(30));

        let graded = fx.workflow.grade(&fx.teacher, submission.id, 90.0).await.unwrap();
        assert!(graded.submission.reviewed);
        assert_eq!(graded.submission.grade, Some(90));
        assert_eq!(graded.submission.reviewed_at, Some(first_look));
    }

    #[tokio::test]
    async fn test_grade_sets_reviewed_at_when_unreviewed() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();
        fx.clock.advance(Duration::minutes(5));
        let graded = fx.workflow.grade(&fx.teacher, submission.id, 70.0).await.unwrap();
        assert_eq!(graded.submission.reviewed_at, Some(fx.clock.now()));
        assert_eq!(graded.grade_record.nama_kelas, "X 1");
        assert_eq!(graded.grade_record.tp.as_deref(), Some("TP1"));
    }

    #[tokio::test]
    async fn test_grading_an_exam_still_syncs_as_task() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Uts, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, None, None)
            .await
            .unwrap();
        let graded = fx.workflow.grade(&fx.teacher, submission.id, 88.0).await.unwrap();
        assert_eq!(graded.grade_record.kategori, SYNCED_CATEGORY);
    }

    #[tokio::test]
    async fn test_grade_storage_failure_is_transient() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        let submission = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();

        fx.storage.fail_writes(true);
        let err = fx
            .workflow
            .grade(&fx.teacher, submission.id, 80.0)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::TransientIo(_)));
        assert_eq!(fx.storage.submission(submission.id).unwrap().grade, None);
        assert!(fx.storage.grade_records().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submission_removes_uploaded_file() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;

        fx.storage.fail_writes(true);
        let err = fx
            .workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::TransientIo(_)));
        assert_eq!(fx.blobs.put_count(), 1);
        assert_eq!(fx.blobs.file_count(), 0);
        assert!(fx.storage.submissions().is_empty());

        fx.storage.fail_writes(false);
        fx.workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();
        assert_eq!(fx.blobs.file_count(), 1);
    }

    #[tokio::test]
    async fn test_create_assignment_validation() {
        let fx = Fixture::new().await;
        let mut req = fx.assignment_request(Category::Tugas);
        req.nama_kelas = "XI 1".to_string();
        let err = fx
            .workflow
            .create_assignment(&fx.teacher, req)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));

        let mut req = fx.assignment_request(Category::Tugas);
        req.mapel = Mapel::Stl;
        assert!(fx.workflow.create_assignment(&fx.teacher, req).await.is_err());

        let mut req = fx.assignment_request(Category::Tugas);
        req.deadline = Some(fx.clock.now() - Duration::minutes(1));
        assert!(fx.workflow.create_assignment(&fx.teacher, req).await.is_err());

        let mut req = fx.assignment_request(Category::Tugas);
        req.judul = "   ".to_string();
        assert!(fx.workflow.create_assignment(&fx.teacher, req).await.is_err());

        let req = fx.assignment_request(Category::Tugas);
        let err = fx
            .workflow
            .create_assignment(&fx.student, req)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Authorization(_)));

        let new_teacher = Actor {
            id: 2,
            role: UserRole::Guru,
            profile: None,
        };
        let req = fx.assignment_request(Category::Tugas);
        let err = fx
            .workflow
            .create_assignment(&new_teacher, req)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_assignment_removes_submissions() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::Tugas, Duration::hours(1)).await;
        fx.workflow
            .submit(&fx.student, assignment.id, pdf(), None)
            .await
            .unwrap();

        fx.workflow
            .delete_assignment(&fx.teacher, assignment.id)
            .await
            .unwrap();
        assert!(fx.storage.submissions().is_empty());
        let err = fx
            .workflow
            .delete_assignment(&fx.teacher, assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_listings() {
        let fx = Fixture::new().await;
        let later = fx.assignment(Category::Tugas, Duration::days(3)).await;
        let sooner = fx.assignment(Category::Uas, Duration::hours(2)).await;
        fx.workflow
            .submit(&fx.student, sooner.id, None, None)
            .await
            .unwrap();

        let teacher_view = fx
            .workflow
            .list_assignments_for_teacher(&fx.teacher, AssignmentListParams::default())
            .await
            .unwrap();
        assert_eq!(teacher_view.len(), 2);
        let counts: HashMap<i64, i64> = teacher_view
            .iter()
            .map(|i| (i.assignment.id, i.submission_count))
            .collect();
        assert_eq!(counts[&sooner.id], 1);
        assert_eq!(counts[&later.id], 0);

        fx.clock.advance(Duration::hours(3));
        let student_view = fx
            .workflow
            .list_assignments_for_student(&fx.student, None, None)
            .await
            .unwrap();
        assert_eq!(student_view[0].assignment.id, sooner.id);
        assert_eq!(student_view[0].state, AssignmentState::Expired);
        assert_eq!(student_view[0].countdown, "Waktu habis");
        assert!(student_view[0].my_submission.is_some());
        assert_eq!(student_view[1].state, AssignmentState::Open);
        assert!(student_view[1].my_submission.is_none());

        let outsider = fx.add_student(31, "Eka", "X 3").await;
        let empty = fx
            .workflow
            .list_assignments_for_student(&outsider, None, None)
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_submissions_grouped_by_class_in_submission_order() {
        let fx = Fixture::new().await;
        let assignment = fx.assignment(Category::UlanganHarian, Duration::hours(5)).await;
        let second = fx.add_student(21, "Ani", "X 1").await;

        fx.workflow
            .submit(&fx.student, assignment.id, None, None)
            .await
            .unwrap();
        fx.clock.advance(Duration::minutes(1));
        fx.workflow
            .submit(&second, assignment.id, None, None)
            .await
            .unwrap();

        let view = fx
            .workflow
            .assignment_submissions(&fx.teacher, assignment.id)
            .await
            .unwrap();
        assert_eq!(view.total, 2);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].nama_kelas, "X 1");
        let names: Vec<&str> = view.groups[0]
            .submissions
            .iter()
            .map(|s| s.student.nama.as_str())
            .collect();
        assert_eq!(names, vec!["Budi", "Ani"]);
    }

    #[tokio::test]
    async fn test_recap_and_summary() {
        let fx = Fixture::new().await;
        let ani = fx.add_student(21, "Ani", "X 1").await;

        for (actor, kategori, nilai) in [
            (&fx.student, Category::Tugas, 80.0),
            (&fx.student, Category::Tugas, 90.0),
            (&fx.student, Category::Uas, 70.0),
            (&ani, Category::Tugas, 100.0),
        ] {
            fx.workflow
                .record_grade(
                    &fx.teacher,
                    CreateGradeRequest {
                        student_id: actor.id,
                        mapel: Mapel::Sejarah,
                        semester: Semester::Ganjil,
                        kategori,
                        tp: Some("TP1".to_string()),
                        judul: format!("{kategori} {nilai}"),
                        nilai,
                        keterangan: None,
                    },
                )
                .await
                .unwrap();
        }

        let rows = fx
            .workflow
            .recap(
                &fx.teacher,
                RecapParams {
                    tingkat: 10,
                    semester: Semester::Ganjil,
                    nama_kelas: Some("X 1".to_string()),
                    mapel: Some(Mapel::Sejarah),
                    tp: None,
                    kategori: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].nama, "Ani");
        assert_eq!(rows[0].overall_average, Some(100.0));
        assert_eq!(rows[1].nama, "Budi");
        assert_eq!(rows[1].overall_average, Some(80.0));

        let summary = fx
            .workflow
            .student_summary(&fx.student, None, None)
            .await
            .unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(80.0));
        assert_eq!(summary.highest, Some(90));
        assert_eq!(summary.lowest, Some(70));
        assert!(summary
            .items
            .iter()
            .any(|i| i.band == GradeBand::SangatBaik && i.feedback == "Sangat Baik"));

        let own = fx
            .workflow
            .grade_history(
                &ani,
                GradeListParams {
                    student_id: Some(fx.student.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(own.items.len(), 1);
        assert!(own.items.iter().all(|r| r.student_id == ani.id));
    }

    #[tokio::test]
    async fn test_record_grade_validation() {
        let fx = Fixture::new().await;
        let req = CreateGradeRequest {
            student_id: fx.student.id,
            mapel: Mapel::Sejarah,
            semester: Semester::Genap,
            kategori: Category::Praktik,
            tp: None,
            judul: "Praktik museum".to_string(),
            nilai: 150.0,
            keterangan: None,
        };
        let err = fx
            .workflow
            .record_grade(&fx.teacher, req.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));

        let err = fx
            .workflow
            .record_grade(
                &fx.teacher,
                CreateGradeRequest {
                    student_id: 777,
                    nilai: 90.0,
                    ..req.clone()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::NotFound(_)));

        let err = fx
            .workflow
            .record_grade(
                &fx.teacher,
                CreateGradeRequest {
                    mapel: Mapel::Stl,
                    nilai: 90.0,
                    ..req
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_profile_derives_tingkat() {
        let fx = Fixture::new().await;
        let newcomer = Actor {
            id: 50,
            role: UserRole::Siswa,
            profile: None,
        };
        let profile = fx
            .workflow
            .update_profile(
                &newcomer,
                UpdateProfileRequest {
                    nama: "Gita".to_string(),
                    tingkat: None,
                    nama_kelas: Some("XII 3".to_string()),
                    nis: Some("12345".to_string()),
                    nip: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.tingkat, Some(12));
        assert_eq!(profile.role, UserRole::Siswa);

        let err = fx
            .workflow
            .update_profile(
                &newcomer,
                UpdateProfileRequest {
                    nama: "Gita".to_string(),
                    tingkat: Some(10),
                    nama_kelas: Some("XII 3".to_string()),
                    nis: None,
                    nip: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }
}
