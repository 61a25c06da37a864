//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub judul: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub deskripsi: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: String,
    pub semester: String,
    pub kategori: String,
    pub tp: Option<String>,
    pub deadline: i64,
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
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::Assignment;
        use crate::models::school::{Category, Mapel, Semester};

        Assignment {
            id: self.id,
            judul: self.judul,
            deskripsi: self.deskripsi,
            file_url: self.file_url,
            file_name: self.file_name,
            tingkat: self.tingkat,
            nama_kelas: self.nama_kelas,
            mapel: self.mapel.parse::<Mapel>().unwrap_or(Mapel::Sejarah),
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::Ganjil),
            kategori: self.kategori.parse::<Category>().unwrap_or(Category::Tugas),
            tp: self.tp,
            deadline: super::from_timestamp(self.deadline),
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
