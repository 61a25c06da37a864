use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户资料表（ID 由身份服务分配）
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::Nama).string().not_null())
                    .col(ColumnDef::new(Profiles::Role).string().not_null())
                    .col(ColumnDef::new(Profiles::Tingkat).integer().null())
                    .col(ColumnDef::new(Profiles::NamaKelas).string().null())
                    .col(ColumnDef::new(Profiles::Nis).string().null())
                    .col(ColumnDef::new(Profiles::Nip).string().null())
                    .col(ColumnDef::new(Profiles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Profiles::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Judul).string().not_null())
                    .col(ColumnDef::new(Assignments::Deskripsi).text().null())
                    .col(ColumnDef::new(Assignments::FileUrl).string().null())
                    .col(ColumnDef::new(Assignments::FileName).string().null())
                    .col(ColumnDef::new(Assignments::Tingkat).integer().not_null())
                    .col(ColumnDef::new(Assignments::NamaKelas).string().not_null())
                    .col(ColumnDef::new(Assignments::Mapel).string().not_null())
                    .col(ColumnDef::new(Assignments::Semester).string().not_null())
                    .col(ColumnDef::new(Assignments::Kategori).string().not_null())
                    .col(ColumnDef::new(Assignments::Tp).string().null())
                    .col(
                        ColumnDef::new(Assignments::Deadline)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CreatedBy)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::FileUrl).string().null())
                    .col(ColumnDef::new(Submissions::FileName).string().null())
                    .col(ColumnDef::new(Submissions::Catatan).text().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::Reviewed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Submissions::ReviewedAt).big_integer().null())
                    .col(ColumnDef::new(Submissions::Grade).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩记录表
        manager
            .create_table(
                Table::create()
                    .table(GradeRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradeRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradeRecords::Tingkat).integer().not_null())
                    .col(ColumnDef::new(GradeRecords::NamaKelas).string().not_null())
                    .col(ColumnDef::new(GradeRecords::Mapel).string().not_null())
                    .col(ColumnDef::new(GradeRecords::Semester).string().not_null())
                    .col(ColumnDef::new(GradeRecords::Kategori).string().not_null())
                    .col(ColumnDef::new(GradeRecords::Tp).string().null())
                    .col(ColumnDef::new(GradeRecords::Judul).string().not_null())
                    .col(ColumnDef::new(GradeRecords::Nilai).integer().not_null())
                    .col(ColumnDef::new(GradeRecords::Keterangan).text().null())
                    .col(
                        ColumnDef::new(GradeRecords::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeRecords::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeRecords::Table, GradeRecords::StudentId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 每个学生对同一作业只允许一条提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_scope")
                    .table(Assignments::Table)
                    .col(Assignments::Tingkat)
                    .col(Assignments::Semester)
                    .col(Assignments::NamaKelas)
                    .to_owned(),
            )
            .await?;

        // 成绩同步的查找键
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grade_records_sync_key")
                    .table(GradeRecords::Table)
                    .col(GradeRecords::StudentId)
                    .col(GradeRecords::Judul)
                    .col(GradeRecords::Kategori)
                    .col(GradeRecords::Mapel)
                    .col(GradeRecords::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grade_records_scope")
                    .table(GradeRecords::Table)
                    .col(GradeRecords::Tingkat)
                    .col(GradeRecords::Semester)
                    .col(GradeRecords::Mapel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(GradeRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    Nama,
    Role,
    Tingkat,
    NamaKelas,
    Nis,
    Nip,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    Judul,
    Deskripsi,
    FileUrl,
    FileName,
    Tingkat,
    NamaKelas,
    Mapel,
    Semester,
    Kategori,
    Tp,
    Deadline,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    FileUrl,
    FileName,
    Catatan,
    SubmittedAt,
    Reviewed,
    ReviewedAt,
    Grade,
}

#[derive(DeriveIden)]
enum GradeRecords {
    #[sea_orm(iden = "grade_records")]
    Table,
    Id,
    StudentId,
    Tingkat,
    NamaKelas,
    Mapel,
    Semester,
    Kategori,
    Tp,
    Judul,
    Nilai,
    Keterangan,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
