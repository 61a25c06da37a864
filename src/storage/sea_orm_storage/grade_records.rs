//! 成绩记录存储操作

use super::SeaOrmStorage;
use crate::entity::grade_records::{ActiveModel, Column, Entity as GradeRecords};
use crate::entity::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions,
};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    grades::{
        entities::{GradeRecord, GradeRecordKey},
        requests::{GradeListQuery, GradeRecordDraft, SubmissionGrade},
        responses::GradeListResponse,
    },
    submissions::responses::GradeSubmissionResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set, TransactionTrait,
};

fn filter_by_key(key: &GradeRecordKey) -> Select<GradeRecords> {
    GradeRecords::find()
        .filter(Column::StudentId.eq(key.student_id))
        .filter(Column::Judul.eq(key.judul.as_str()))
        .filter(Column::Kategori.eq(key.kategori.as_str()))
        .filter(Column::Mapel.eq(key.mapel.as_str()))
        .filter(Column::Semester.eq(key.semester.as_str()))
}

async fn insert_draft<C: ConnectionTrait>(conn: &C, draft: GradeRecordDraft) -> Result<GradeRecord> {
    let now = draft.at.timestamp();
    let model = ActiveModel {
        student_id: Set(draft.key.student_id),
        tingkat: Set(draft.tingkat),
        nama_kelas: Set(draft.nama_kelas),
        mapel: Set(draft.key.mapel.to_string()),
        semester: Set(draft.key.semester.to_string()),
        kategori: Set(draft.key.kategori.to_string()),
        tp: Set(draft.tp),
        judul: Set(draft.key.judul),
        nilai: Set(draft.nilai),
        keterangan: Set(draft.keterangan),
        created_by: Set(draft.created_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| LmsError::transient_io(format!("创建成绩记录失败: {e}")))?;

    Ok(result.into_grade_record())
}

impl SeaOrmStorage {
    /// 评分并同步成绩记录
    ///
    /// 提交更新与成绩记录写入在同一事务内：任一步失败则全部回滚。
    /// 已有成绩记录时只覆盖分数。
    pub async fn apply_submission_grade_impl(
        &self,
        grade: SubmissionGrade,
    ) -> Result<GradeSubmissionResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::transient_io(format!("开启事务失败: {e}")))?;

        let Some(model) = Submissions::find_by_id(grade.submission_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询提交失败: {e}")))?
        else {
            return Err(LmsError::not_found(format!(
                "提交 {} 不存在",
                grade.submission_id
            )));
        };

        let reviewed_at = model
            .reviewed_at
            .unwrap_or_else(|| grade.reviewed_at.timestamp());
        let mut active: SubmissionActiveModel = model.into();
        active.grade = Set(Some(grade.value));
        active.reviewed = Set(true);
        active.reviewed_at = Set(Some(reviewed_at));
        let submission = active
            .update(&txn)
            .await
            .map_err(|e| LmsError::transient_io(format!("更新提交评分失败: {e}")))?;

        let existing = filter_by_key(&grade.record.key)
            .order_by_asc(Column::Id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询成绩记录失败: {e}")))?;

        let (grade_record, record_created) = match existing {
            Some(record) => {
                let mut active: ActiveModel = record.into();
                active.nilai = Set(grade.record.nilai);
                active.updated_at = Set(grade.record.at.timestamp());
                let updated = active
                    .update(&txn)
                    .await
                    .map_err(|e| LmsError::transient_io(format!("更新成绩记录失败: {e}")))?;
                (updated.into_grade_record(), false)
            }
            None => (insert_draft(&txn, grade.record).await?, true),
        };

        txn.commit()
            .await
            .map_err(|e| LmsError::transient_io(format!("提交事务失败: {e}")))?;

        Ok(GradeSubmissionResponse {
            submission: submission.into_submission(),
            grade_record,
            record_created,
        })
    }

    /// 直接录入成绩
    pub async fn create_grade_record_impl(&self, draft: GradeRecordDraft) -> Result<GradeRecord> {
        insert_draft(&self.db, draft).await
    }

    /// 列出成绩记录
    pub async fn list_grade_records_impl(&self, query: GradeListQuery) -> Result<GradeListResponse> {
        let mut select = GradeRecords::find();

        if let Some(tingkat) = query.tingkat {
            select = select.filter(Column::Tingkat.eq(tingkat));
        }
        if let Some(ref nama_kelas) = query.nama_kelas
            && !nama_kelas.trim().is_empty()
        {
            select = select.filter(Column::NamaKelas.eq(nama_kelas.trim()));
        }
        if let Some(mapel) = query.mapel {
            select = select.filter(Column::Mapel.eq(mapel.as_str()));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.as_str()));
        }
        if let Some(kategori) = query.kategori {
            select = select.filter(Column::Kategori.eq(kategori.as_str()));
        }
        if let Some(ref tp) = query.tp
            && !tp.trim().is_empty()
        {
            select = select.filter(Column::Tp.eq(tp.trim()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 最新的在前
        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let Some(page) = query.page else {
            let items: Vec<GradeRecord> = select
                .all(&self.db)
                .await
                .map_err(|e| LmsError::transient_io(format!("查询成绩记录失败: {e}")))?
                .into_iter()
                .map(|m| m.into_grade_record())
                .collect();
            let total = items.len() as u64;
            return Ok(GradeListResponse {
                items,
                pagination: PaginationInfo::new(1, total.max(1), total),
            });
        };

        let page = page.max(1);
        let size = query.size.unwrap_or(10).clamp(1, 100);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::transient_io(format!("查询成绩总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::transient_io(format!("查询成绩记录失败: {e}")))?
            .into_iter()
            .map(|m| m.into_grade_record())
            .collect();

        Ok(GradeListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
