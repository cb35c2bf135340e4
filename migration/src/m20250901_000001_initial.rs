use sea_orm_migration::prelude::*;

/// Participants (抽奖人员)
#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    Username,
    EmployeeId,
}

/// Prizes (奖品)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    Name,
    Level,
    Quantity,
}

/// Win biases (中奖倾向: 0 默认 / 1 必中 / 2 必不中)
#[derive(DeriveIden)]
enum WinBiases {
    Table,
    Id,
    ParticipantId,
    Bias,
    PrizeId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 人员表
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Participants::Username).string().not_null())
                    .col(
                        ColumnDef::new(Participants::EmployeeId)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_username")
                    .table(Participants::Table)
                    .col(Participants::Username)
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::Name).string().not_null())
                    .col(ColumnDef::new(Prizes::Level).string().not_null())
                    .col(
                        ColumnDef::new(Prizes::Quantity)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_level")
                    .table(Prizes::Table)
                    .col(Prizes::Level)
                    .to_owned(),
            )
            .await?;

        // 中奖倾向表, 每个人员至多一条
        manager
            .create_table(
                Table::create()
                    .table(WinBiases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WinBiases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WinBiases::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WinBiases::Bias)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(WinBiases::PrizeId).big_integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_win_biases_participant_unique")
                    .table(WinBiases::Table)
                    .col(WinBiases::ParticipantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(WinBiases::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
