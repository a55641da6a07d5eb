use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_catalog::{Actors, Movies};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Directors::Table)
                    .if_not_exists()
                    .col(pk_auto(Directors::Id))
                    .col(string_len(Directors::Name, 256))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Oscar::Table)
                    .if_not_exists()
                    .col(pk_auto(Oscar::Id))
                    .col(integer(Oscar::Year))
                    .col(string_len(Oscar::Nomination, 256))
                    .col(integer(Oscar::MovieId))
                    .col(integer_null(Oscar::ActorId))
                    .col(integer_null(Oscar::DirectorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oscar_movie")
                            .from(Oscar::Table, Oscar::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oscar_actor")
                            .from(Oscar::Table, Oscar::ActorId)
                            .to(Actors::Table, Actors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_oscar_director")
                            .from(Oscar::Table, Oscar::DirectorId)
                            .to(Directors::Table, Directors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_oscar_year")
                    .table(Oscar::Table)
                    .col(Oscar::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Oscar::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Directors::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Directors {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Oscar {
    Table,
    Id,
    Year,
    Nomination,
    MovieId,
    ActorId,
    DirectorId,
}
