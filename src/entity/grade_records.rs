//! 成绩记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub tingkat: i32,
    pub nama_kelas: String,
    pub mapel: String,
    pub semester: String,
    pub kategori: String,
    pub tp: Option<String>,
    pub judul: String,
    pub nilai: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub keterangan: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::StudentId",
        to = "super::profiles::Column::Id"
    )]
    Student,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_record(self) -> crate::models::grades::entities::GradeRecord {
        use crate::models::grades::entities::GradeRecord;
        use crate::models::school::{Category, Mapel, Semester};

        GradeRecord {
            id: self.id,
            student_id: self.student_id,
            tingkat: self.tingkat,
            nama_kelas: self.nama_kelas,
            mapel: self.mapel.parse::<Mapel>().unwrap_or(Mapel::Sejarah),
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::Ganjil),
            kategori: self.kategori.parse::<Category>().unwrap_or(Category::Tugas),
            tp: self.tp,
            judul: self.judul,
            nilai: self.nilai,
            keterangan: self.keterangan,
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
