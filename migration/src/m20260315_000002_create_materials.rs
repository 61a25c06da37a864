use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学习材料表
        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Materials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Materials::Judul).string().not_null())
                    .col(ColumnDef::new(Materials::Deskripsi).text().null())
                    .col(ColumnDef::new(Materials::FileUrl).string().not_null())
                    .col(ColumnDef::new(Materials::FileName).string().not_null())
                    .col(ColumnDef::new(Materials::FilePath).string().not_null())
                    .col(ColumnDef::new(Materials::Tingkat).integer().not_null())
                    .col(ColumnDef::new(Materials::NamaKelas).string().not_null())
                    .col(ColumnDef::new(Materials::Mapel).string().not_null())
                    .col(ColumnDef::new(Materials::Semester).string().not_null())
                    .col(
                        ColumnDef::new(Materials::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Materials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Materials::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Materials::Table, Materials::CreatedBy)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教学文档表（学年计划、学期计划、教案）
        manager
            .create_table(
                Table::create()
                    .table(LessonPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonPlans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonPlans::Judul).string().not_null())
                    .col(ColumnDef::new(LessonPlans::Tipe).string().not_null())
                    .col(ColumnDef::new(LessonPlans::FileUrl).string().not_null())
                    .col(ColumnDef::new(LessonPlans::FileName).string().not_null())
                    .col(ColumnDef::new(LessonPlans::FilePath).string().not_null())
                    .col(ColumnDef::new(LessonPlans::Tingkat).integer().not_null())
                    .col(ColumnDef::new(LessonPlans::NamaKelas).string().null())
                    .col(ColumnDef::new(LessonPlans::Mapel).string().not_null())
                    .col(ColumnDef::new(LessonPlans::Semester).string().not_null())
                    .col(ColumnDef::new(LessonPlans::TahunAjaran).string().not_null())
                    .col(ColumnDef::new(LessonPlans::Tp).string().null())
                    .col(
                        ColumnDef::new(LessonPlans::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonPlans::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonPlans::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LessonPlans::Table, LessonPlans::CreatedBy)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_materials_scope")
                    .table(Materials::Table)
                    .col(Materials::NamaKelas)
                    .col(Materials::Mapel)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lesson_plans_scope")
                    .table(LessonPlans::Table)
                    .col(LessonPlans::Tipe)
                    .col(LessonPlans::Tingkat)
                    .col(LessonPlans::TahunAjaran)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LessonPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Materials::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Materials {
    #[sea_orm(iden = "materials")]
    Table,
    Id,
    Judul,
    Deskripsi,
    FileUrl,
    FileName,
    FilePath,
    Tingkat,
    NamaKelas,
    Mapel,
    Semester,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LessonPlans {
    #[sea_orm(iden = "lesson_plans")]
    Table,
    Id,
    Judul,
    Tipe,
    FileUrl,
    FileName,
    FilePath,
    Tingkat,
    NamaKelas,
    Mapel,
    Semester,
    TahunAjaran,
    Tp,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
