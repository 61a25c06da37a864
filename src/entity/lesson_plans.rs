//! 教学文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub judul: String,
    pub tipe: String,
    pub file_url: String,
    pub file_name: String,
    pub file_path: String,
    pub tingkat: i32,
    pub nama_kelas: Option<String>,
    pub mapel: String,
    pub semester: String,
    pub tahun_ajaran: String,
    pub tp: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::CreatedBy",
        to = "super::profiles::Column::Id"
    )]
    Creator,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lesson_plan(self) -> crate::models::lesson_plans::entities::LessonPlan {
        use crate::models::lesson_plans::entities::{DocumentType, LessonPlan};
        use crate::models::school::{Mapel, Semester};

        LessonPlan {
            id: self.id,
            judul: self.judul,
            tipe: self.tipe.parse::<DocumentType>().unwrap_or(DocumentType::Rpp),
            file_url: self.file_url,
            file_name: self.file_name,
            file_path: self.file_path,
            tingkat: self.tingkat,
            nama_kelas: self.nama_kelas,
            mapel: self.mapel.parse::<Mapel>().unwrap_or(Mapel::Sejarah),
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::Ganjil),
            tahun_ajaran: self.tahun_ajaran,
            tp: self.tp,
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
