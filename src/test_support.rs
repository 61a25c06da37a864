//! 单元测试用的内存存储与夹具

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::blob::BlobStorage;
use crate::clock::{Clock, FixedClock};
use crate::errors::{LmsError, Result};
use crate::grading::GradingWorkflow;
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, NewAssignment},
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
    profiles::{
        entities::{Actor, Profile, UserRole},
        requests::ProfileUpsert,
    },
    school::{Category, Mapel, Semester, tingkat_from_kelas},
    submissions::{
        entities::Submission, requests::NewSubmission, responses::GradeSubmissionResponse,
    },
};
use crate::storage::Storage;

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

#[derive(Default)]
struct State {
    next_id: i64,
    profiles: HashMap<i64, Profile>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
    grade_records: Vec<GradeRecord>,
    materials: Vec<Material>,
    lesson_plans: Vec<LessonPlan>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// 内存存储，可模拟写入失败
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LmsError::transient_io("数据库不可用"));
        }
        Ok(())
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.lock().submissions.clone()
    }

    pub fn submission(&self, id: i64) -> Option<Submission> {
        self.lock().submissions.iter().find(|s| s.id == id).cloned()
    }

    pub fn grade_records(&self) -> Vec<GradeRecord> {
        self.lock().grade_records.clone()
    }

    pub fn materials(&self) -> Vec<Material> {
        self.lock().materials.clone()
    }

    pub fn lesson_plans(&self) -> Vec<LessonPlan> {
        self.lock().lesson_plans.clone()
    }
}

fn record_from_draft(id: i64, draft: GradeRecordDraft) -> GradeRecord {
    GradeRecord {
        id,
        student_id: draft.key.student_id,
        tingkat: draft.tingkat,
        nama_kelas: draft.nama_kelas,
        mapel: draft.key.mapel,
        semester: draft.key.semester,
        kategori: draft.key.kategori,
        tp: draft.tp,
        judul: draft.key.judul,
        nilai: draft.nilai,
        keterangan: draft.keterangan,
        created_by: draft.created_by,
        created_at: draft.at,
        updated_at: draft.at,
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn upsert_profile(&self, profile: ProfileUpsert, at: DateTime<Utc>) -> Result<Profile> {
        self.check_write()?;
        let mut state = self.lock();
        let created_at = state
            .profiles
            .get(&profile.id)
            .map(|p| p.created_at)
            .unwrap_or(at);
        let stored = Profile {
            id: profile.id,
            nama: profile.nama,
            role: profile.role,
            tingkat: profile.tingkat,
            nama_kelas: profile.nama_kelas,
            nis: profile.nis,
            nip: profile.nip,
            created_at,
            updated_at: at,
        };
        state.profiles.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>> {
        Ok(self.lock().profiles.get(&id).cloned())
    }

    async fn list_profiles_by_ids(&self, ids: &[i64]) -> Result<Vec<Profile>> {
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.profiles.get(id).cloned())
            .collect())
    }

    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.check_write()?;
        let mut state = self.lock();
        let stored = Assignment {
            id: state.next_id(),
            judul: assignment.judul,
            deskripsi: assignment.deskripsi,
            file_url: assignment.file_url,
            file_name: assignment.file_name,
            tingkat: assignment.tingkat,
            nama_kelas: assignment.nama_kelas,
            mapel: assignment.mapel,
            semester: assignment.semester,
            kategori: assignment.kategori,
            tp: assignment.tp,
            deadline: assignment.deadline,
            created_by: assignment.created_by,
            created_at: assignment.created_at,
            updated_at: assignment.created_at,
        };
        state.assignments.push(stored.clone());
        Ok(stored)
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        Ok(self.lock().assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>> {
        let mut items: Vec<Assignment> = self
            .lock()
            .assignments
            .iter()
            .filter(|a| query.tingkat.is_none_or(|t| a.tingkat == t))
            .filter(|a| query.nama_kelas.as_ref().is_none_or(|k| &a.nama_kelas == k))
            .filter(|a| query.mapel.is_none_or(|m| a.mapel == m))
            .filter(|a| query.semester.is_none_or(|s| a.semester == s))
            .filter(|a| query.kategori.is_none_or(|c| a.kategori == c))
            .filter(|a| query.created_by.is_none_or(|c| a.created_by == c))
            .cloned()
            .collect();
        items.sort_by_key(|a| (a.deadline, a.id));
        Ok(items)
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.check_write()?;
        let mut state = self.lock();
        let before = state.assignments.len();
        state.assignments.retain(|a| a.id != id);
        if state.assignments.len() == before {
            return Ok(false);
        }
        state.submissions.retain(|s| s.assignment_id != id);
        Ok(true)
    }

    async fn count_submissions_by_assignment_ids(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        let state = self.lock();
        let mut counts = HashMap::new();
        for s in &state.submissions {
            if assignment_ids.contains(&s.assignment_id) {
                *counts.entry(s.assignment_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission> {
        self.check_write()?;
        let mut state = self.lock();
        if state.submissions.iter().any(|s| {
            s.assignment_id == submission.assignment_id && s.student_id == submission.student_id
        }) {
            return Err(LmsError::validation("Tugas ini sudah dikumpulkan"));
        }
        let stored = Submission {
            id: state.next_id(),
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            file_url: submission.file_url,
            file_name: submission.file_name,
            catatan: submission.catatan,
            submitted_at: submission.submitted_at,
            reviewed: false,
            reviewed_at: None,
            grade: None,
        };
        state.submissions.push(stored.clone());
        Ok(stored)
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        Ok(self.submission(id))
    }

    async fn find_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        Ok(self
            .lock()
            .submissions
            .iter()
            .find(|s| s.assignment_id == assignment_id && s.student_id == student_id)
            .cloned())
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<(Submission, Option<Profile>)>> {
        let state = self.lock();
        let mut rows: Vec<(Submission, Option<Profile>)> = state
            .submissions
            .iter()
            .filter(|s| s.assignment_id == assignment_id)
            .map(|s| (s.clone(), state.profiles.get(&s.student_id).cloned()))
            .collect();
        rows.sort_by_key(|(s, _)| (s.submitted_at, s.id));
        Ok(rows)
    }

    async fn list_submissions_by_student(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        Ok(self
            .lock()
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id && assignment_ids.contains(&s.assignment_id))
            .cloned()
            .collect())
    }

    async fn set_submission_reviewed(
        &self,
        id: i64,
        reviewed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Submission>> {
        self.check_write()?;
        let mut state = self.lock();
        let Some(submission) = state.submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        submission.reviewed = reviewed_at.is_some();
        submission.reviewed_at = reviewed_at;
        Ok(Some(submission.clone()))
    }

    async fn apply_submission_grade(
        &self,
        grade: SubmissionGrade,
    ) -> Result<GradeSubmissionResponse> {
        self.check_write()?;
        let mut state = self.lock();
        let Some(index) = state
            .submissions
            .iter()
            .position(|s| s.id == grade.submission_id)
        else {
            return Err(LmsError::not_found("提交不存在"));
        };

        let submission = {
            let s = &mut state.submissions[index];
            s.grade = Some(grade.value);
            s.reviewed = true;
            s.reviewed_at = s.reviewed_at.or(Some(grade.reviewed_at));
            s.clone()
        };

        let draft = grade.record;
        let existing = state
            .grade_records
            .iter_mut()
            .find(|r| draft.key.matches(r));
        let (grade_record, record_created) = match existing {
            Some(record) => {
                record.nilai = draft.nilai;
                record.updated_at = draft.at;
                (record.clone(), false)
            }
            None => {
                let id = state.next_id();
                let record = record_from_draft(id, draft);
                state.grade_records.push(record.clone());
                (record, true)
            }
        };

        Ok(GradeSubmissionResponse {
            submission,
            grade_record,
            record_created,
        })
    }

    async fn create_grade_record(&self, draft: GradeRecordDraft) -> Result<GradeRecord> {
        self.check_write()?;
        let mut state = self.lock();
        let id = state.next_id();
        let record = record_from_draft(id, draft);
        state.grade_records.push(record.clone());
        Ok(record)
    }

    async fn list_grade_records(&self, query: GradeListQuery) -> Result<GradeListResponse> {
        let mut items: Vec<GradeRecord> = self
            .lock()
            .grade_records
            .iter()
            .filter(|r| query.student_id.is_none_or(|id| r.student_id == id))
            .filter(|r| query.tingkat.is_none_or(|t| r.tingkat == t))
            .filter(|r| query.nama_kelas.as_ref().is_none_or(|k| &r.nama_kelas == k))
            .filter(|r| query.mapel.is_none_or(|m| r.mapel == m))
            .filter(|r| query.semester.is_none_or(|s| r.semester == s))
            .filter(|r| query.kategori.is_none_or(|c| r.kategori == c))
            .filter(|r| query.tp.as_ref().is_none_or(|tp| r.tp.as_ref() == Some(tp)))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = items.len() as u64;
        let Some(page) = query.page else {
            return Ok(GradeListResponse {
                items,
                pagination: PaginationInfo::new(1, total.max(1), total),
            });
        };
        let size = query.size.unwrap_or(10).max(1);
        let items = items
            .into_iter()
            .skip(((page.max(1) - 1) * size) as usize)
            .take(size as usize)
            .collect();
        Ok(GradeListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    async fn create_material(&self, material: NewMaterial) -> Result<Material> {
        self.check_write()?;
        let mut state = self.lock();
        let stored = Material {
            id: state.next_id(),
            judul: material.judul,
            deskripsi: material.deskripsi,
            file_url: material.file_url,
            file_name: material.file_name,
            file_path: material.file_path,
            tingkat: material.tingkat,
            nama_kelas: material.nama_kelas,
            mapel: material.mapel,
            semester: material.semester,
            created_by: material.created_by,
            created_at: material.created_at,
            updated_at: material.created_at,
        };
        state.materials.push(stored.clone());
        Ok(stored)
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>> {
        Ok(self.lock().materials.iter().find(|m| m.id == id).cloned())
    }

    async fn list_materials(&self, query: MaterialListQuery) -> Result<Vec<Material>> {
        let mut items: Vec<Material> = self
            .lock()
            .materials
            .iter()
            .filter(|m| query.tingkat.is_none_or(|t| m.tingkat == t))
            .filter(|m| query.nama_kelas.as_ref().is_none_or(|k| &m.nama_kelas == k))
            .filter(|m| query.mapel.is_none_or(|x| m.mapel == x))
            .filter(|m| query.semester.is_none_or(|s| m.semester == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.check_write()?;
        let mut state = self.lock();
        let before = state.materials.len();
        state.materials.retain(|m| m.id != id);
        Ok(state.materials.len() < before)
    }

    async fn create_lesson_plan(&self, plan: NewLessonPlan) -> Result<LessonPlan> {
        self.check_write()?;
        let mut state = self.lock();
        let stored = LessonPlan {
            id: state.next_id(),
            judul: plan.judul,
            tipe: plan.tipe,
            file_url: plan.file_url,
            file_name: plan.file_name,
            file_path: plan.file_path,
            tingkat: plan.tingkat,
            nama_kelas: plan.nama_kelas,
            mapel: plan.mapel,
            semester: plan.semester,
            tahun_ajaran: plan.tahun_ajaran,
            tp: plan.tp,
            created_by: plan.created_by,
            created_at: plan.created_at,
            updated_at: plan.created_at,
        };
        state.lesson_plans.push(stored.clone());
        Ok(stored)
    }

    async fn get_lesson_plan_by_id(&self, id: i64) -> Result<Option<LessonPlan>> {
        Ok(self.lock().lesson_plans.iter().find(|p| p.id == id).cloned())
    }

    async fn list_lesson_plans(&self, query: LessonPlanListQuery) -> Result<Vec<LessonPlan>> {
        let mut items: Vec<LessonPlan> = self
            .lock()
            .lesson_plans
            .iter()
            .filter(|p| query.tipe.is_none_or(|t| p.tipe == t))
            .filter(|p| query.tingkat.is_none_or(|t| p.tingkat == t))
            .filter(|p| {
                query
                    .nama_kelas
                    .as_ref()
                    .is_none_or(|k| p.nama_kelas.as_ref() == Some(k))
            })
            .filter(|p| query.mapel.is_none_or(|m| p.mapel == m))
            .filter(|p| query.semester.is_none_or(|s| p.semester == s))
            .filter(|p| query.tahun_ajaran.as_ref().is_none_or(|y| &p.tahun_ajaran == y))
            .filter(|p| query.tp.as_ref().is_none_or(|tp| p.tp.as_ref() == Some(tp)))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn delete_lesson_plan(&self, id: i64) -> Result<bool> {
        self.check_write()?;
        let mut state = self.lock();
        let before = state.lesson_plans.len();
        state.lesson_plans.retain(|p| p.id != id);
        Ok(state.lesson_plans.len() < before)
    }
}

/// 内存文件存储，记录写入次数
#[derive(Default)]
pub struct MemoryBlobStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
    puts: AtomicUsize,
}

impl MemoryBlobStorage {
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn put(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<String> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.files
            .lock()
            .unwrap()
            .insert(format!("{bucket}/{path}"), bytes.to_vec());
        Ok(self.public_url(bucket, path))
    }

    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(&format!("{bucket}/{path}"))
            .cloned()
            .ok_or_else(|| LmsError::not_found("文件不存在"))
    }

    async fn delete(&self, bucket: &str, path: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(&format!("{bucket}/{path}"));
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://{bucket}/{path}")
    }
}

/// 一位教师、一位 X 1 班学生 Budi 与固定时钟
pub struct Fixture {
    pub storage: Arc<MemoryStorage>,
    pub blobs: Arc<MemoryBlobStorage>,
    pub clock: Arc<FixedClock>,
    pub workflow: GradingWorkflow,
    pub teacher: Actor,
    pub student: Actor,
}

impl Fixture {
    pub async fn new() -> Self {
        let storage = Arc::new(MemoryStorage::default());
        let blobs = Arc::new(MemoryBlobStorage::default());
        let clock = Arc::new(FixedClock::new(at(1_767_225_600)));
        let workflow = GradingWorkflow::new(storage.clone(), blobs.clone(), clock.clone());

        let teacher_profile = storage
            .upsert_profile(
                ProfileUpsert {
                    id: 1,
                    nama: "Pak Hadi".to_string(),
                    role: UserRole::Guru,
                    tingkat: None,
                    nama_kelas: None,
                    nis: None,
                    nip: Some("198001012005".to_string()),
                },
                clock.now(),
            )
            .await
            .unwrap();
        let teacher = Actor {
            id: teacher_profile.id,
            role: UserRole::Guru,
            profile: Some(teacher_profile),
        };

        let mut fixture = Self {
            storage,
            blobs,
            clock,
            workflow,
            teacher,
            student: Actor {
                id: 0,
                role: UserRole::Siswa,
                profile: None,
            },
        };
        fixture.student = fixture.add_student(20, "Budi", "X 1").await;
        fixture
    }

    pub async fn add_student(&self, id: i64, nama: &str, nama_kelas: &str) -> Actor {
        let profile = self
            .storage
            .upsert_profile(
                ProfileUpsert {
                    id,
                    nama: nama.to_string(),
                    role: UserRole::Siswa,
                    tingkat: Some(tingkat_from_kelas(nama_kelas)),
                    nama_kelas: Some(nama_kelas.to_string()),
                    nis: Some(format!("{:05}", id)),
                    nip: None,
                },
                self.clock.now(),
            )
            .await
            .unwrap();
        Actor {
            id,
            role: UserRole::Siswa,
            profile: Some(profile),
        }
    }

    /// X 1 班的 Sejarah 作业，截止时间默认一周后
    pub fn assignment_request(&self, kategori: Category) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            judul: "Proklamasi Kemerdekaan".to_string(),
            deskripsi: Some("Ringkas peristiwa 17 Agustus 1945".to_string()),
            file_url: None,
            file_name: None,
            tingkat: 10,
            nama_kelas: "X 1".to_string(),
            mapel: Mapel::Sejarah,
            semester: Semester::Ganjil,
            kategori,
            tp: Some("TP1".to_string()),
            deadline: None,
            deadline_days: None,
            deadline_hours: None,
        }
    }

    pub async fn assignment(&self, kategori: Category, due_in: Duration) -> Assignment {
        let mut req = self.assignment_request(kategori);
        req.deadline = Some(self.clock.now() + due_in);
        self.workflow
            .create_assignment(&self.teacher, req)
            .await
            .unwrap()
    }
}
