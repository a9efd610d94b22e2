use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_catalog_tables::Migration),
            Box::new(m20240501_000002_create_account_tables::Migration),
            Box::new(m20240501_000003_create_order_tables::Migration),
            Box::new(m20240501_000004_create_settings_tables::Migration),
        ]
    }
}

mod m20240501_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Produk::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Produk::KodeItem)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Produk::Barcode).string())
                        .col(ColumnDef::new(Produk::KodePabrik).string())
                        .col(ColumnDef::new(Produk::KodeToko).string())
                        .col(ColumnDef::new(Produk::KodeSupplier).string())
                        .col(ColumnDef::new(Produk::NamaProduk).string().not_null())
                        .col(ColumnDef::new(Produk::NamaProdukAsli).string().not_null())
                        .col(ColumnDef::new(Produk::NamaProdukSebutan).string())
                        .col(ColumnDef::new(Produk::Merk).string())
                        .col(ColumnDef::new(Produk::Tipe).string())
                        .col(ColumnDef::new(Produk::SatuanBesar).string())
                        .col(ColumnDef::new(Produk::SatuanKecil).string())
                        .col(ColumnDef::new(Produk::IsiSatuanBesar).string())
                        .col(
                            ColumnDef::new(Produk::Konversi)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::HargaPokok)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Harga1)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Harga2)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Harga3)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Harga4)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Harga5)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Harga6)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::HargaDiskon)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Produk::Berat).double().not_null().default(0))
                        .col(
                            ColumnDef::new(Produk::Volume)
                                .double()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Produk::Slug).string().not_null())
                        .col(ColumnDef::new(Produk::Kategori).string().not_null())
                        .col(ColumnDef::new(Produk::Subkategori).string())
                        .col(
                            ColumnDef::new(Produk::TotalStok)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Produk::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Produk::Deskripsi).text())
                        .col(
                            ColumnDef::new(Produk::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Produk::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_produk_slug")
                        .table(Produk::Table)
                        .col(Produk::Slug)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_produk_kategori")
                        .table(Produk::Table)
                        .col(Produk::Kategori)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Kategori::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Kategori::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Kategori::Nama)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Kategori::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Kategori::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Kategori::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Image::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Image::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Image::KodeItem).string().not_null())
                        .col(ColumnDef::new(Image::Url).string().not_null())
                        .col(
                            ColumnDef::new(Image::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Banner::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Banner::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Banner::Url).string().not_null())
                        .col(
                            ColumnDef::new(Banner::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Banner::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Image::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Kategori::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Produk::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Produk {
        Table,
        KodeItem,
        Barcode,
        KodePabrik,
        KodeToko,
        KodeSupplier,
        NamaProduk,
        NamaProdukAsli,
        NamaProdukSebutan,
        Merk,
        Tipe,
        SatuanBesar,
        SatuanKecil,
        IsiSatuanBesar,
        Konversi,
        HargaPokok,
        #[iden = "harga_1"]
        Harga1,
        #[iden = "harga_2"]
        Harga2,
        #[iden = "harga_3"]
        Harga3,
        #[iden = "harga_4"]
        Harga4,
        #[iden = "harga_5"]
        Harga5,
        #[iden = "harga_6"]
        Harga6,
        HargaDiskon,
        Berat,
        Volume,
        Slug,
        Kategori,
        Subkategori,
        TotalStok,
        Active,
        Deskripsi,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Kategori {
        Table,
        Id,
        Nama,
        Active,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Image {
        Table,
        Id,
        KodeItem,
        Url,
        CreatedAt,
    }

    #[derive(Iden)]
    enum Banner {
        Table,
        Id,
        Url,
        CreatedAt,
    }
}

mod m20240501_000002_create_account_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000002_create_account_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(User::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(User::UserId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(User::Nama).string().not_null())
                        .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                        .col(ColumnDef::new(User::NoTelpon).string())
                        .col(ColumnDef::new(User::PasswordHash).string().not_null())
                        .col(ColumnDef::new(User::TanggalLahir).string())
                        .col(ColumnDef::new(User::JenisKelamin).string())
                        .col(
                            ColumnDef::new(User::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(User::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Operator::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Operator::Username)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Operator::Nama).string().not_null())
                        .col(ColumnDef::new(Operator::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Operator::PasswordEncrypt).string())
                        .col(ColumnDef::new(Operator::Role).string().not_null())
                        .col(
                            ColumnDef::new(Operator::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Operator::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Address::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Address::AddressId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Address::UserId).string().not_null())
                        .col(ColumnDef::new(Address::NamaPenerima).string().not_null())
                        .col(ColumnDef::new(Address::NoTelpon).string().not_null())
                        .col(ColumnDef::new(Address::Provinsi).string().not_null())
                        .col(ColumnDef::new(Address::Kota).string().not_null())
                        .col(ColumnDef::new(Address::Kecamatan).string().not_null())
                        .col(ColumnDef::new(Address::AlamatLengkap).string().not_null())
                        .col(ColumnDef::new(Address::Label).string().not_null())
                        .col(ColumnDef::new(Address::KodePos).string().not_null())
                        .col(
                            ColumnDef::new(Address::MainAddress)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Address::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Address::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_address_user")
                        .table(Address::Table)
                        .col(Address::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Cart::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Cart::CartId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Cart::UserId).string().not_null())
                        .col(ColumnDef::new(Cart::KodeItem).string().not_null())
                        .col(ColumnDef::new(Cart::Qty).integer().not_null())
                        .col(
                            ColumnDef::new(Cart::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Cart::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Cart::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_cart_user_item")
                        .table(Cart::Table)
                        .col(Cart::UserId)
                        .col(Cart::KodeItem)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Cart::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Address::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Operator::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(User::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum User {
        Table,
        UserId,
        Nama,
        Email,
        NoTelpon,
        PasswordHash,
        TanggalLahir,
        JenisKelamin,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Operator {
        Table,
        Username,
        Nama,
        PasswordHash,
        PasswordEncrypt,
        Role,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Address {
        Table,
        AddressId,
        UserId,
        NamaPenerima,
        NoTelpon,
        Provinsi,
        Kota,
        Kecamatan,
        AlamatLengkap,
        Label,
        KodePos,
        MainAddress,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Cart {
        Table,
        CartId,
        UserId,
        KodeItem,
        Qty,
        Active,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240501_000003_create_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000003_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Transaksi::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Transaksi::TransaksiId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Transaksi::UserId).string().not_null())
                        .col(ColumnDef::new(Transaksi::NoRekening).string().not_null())
                        .col(ColumnDef::new(Transaksi::AtasNama).string().not_null())
                        .col(ColumnDef::new(Transaksi::Bank).string().not_null())
                        .col(ColumnDef::new(Transaksi::NamaPenerima).string().not_null())
                        .col(ColumnDef::new(Transaksi::NoTelpon).string().not_null())
                        .col(ColumnDef::new(Transaksi::Provinsi).string())
                        .col(ColumnDef::new(Transaksi::Kota).string())
                        .col(ColumnDef::new(Transaksi::Kecamatan).string())
                        .col(ColumnDef::new(Transaksi::AlamatLengkap).string())
                        .col(ColumnDef::new(Transaksi::KodePos).string())
                        .col(
                            ColumnDef::new(Transaksi::Type)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transaksi::SubtotalProduk)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transaksi::SubtotalOngkir)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Transaksi::Total).big_integer().not_null())
                        .col(ColumnDef::new(Transaksi::Status).string_len(20).not_null())
                        .col(
                            ColumnDef::new(Transaksi::Replied)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Transaksi::Alasan).string())
                        .col(
                            ColumnDef::new(Transaksi::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Transaksi::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_transaksi_user")
                        .table(Transaksi::Table)
                        .col(Transaksi::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Payment::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Payment::PaymentId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payment::TransaksiId)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Payment::Status).string_len(20).not_null())
                        .col(ColumnDef::new(Payment::Url).string())
                        .col(ColumnDef::new(Payment::Nama).string())
                        .col(ColumnDef::new(Payment::Dari).string())
                        .col(ColumnDef::new(Payment::Metode).string())
                        .col(ColumnDef::new(Payment::Alasan).string())
                        .col(ColumnDef::new(Payment::Expired).big_integer())
                        .col(
                            ColumnDef::new(Payment::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payment::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_payment_transaksi")
                                .from(Payment::Table, Payment::TransaksiId)
                                .to(Transaksi::Table, Transaksi::TransaksiId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TransaksiDetail::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TransaksiDetail::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::TransaksiId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::KodeItem)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::NamaProduk)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::Kategori)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::Harga)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TransaksiDetail::SubtotalProduk)
                                .big_integer()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_transaksi_detail_transaksi")
                                .from(TransaksiDetail::Table, TransaksiDetail::TransaksiId)
                                .to(Transaksi::Table, Transaksi::TransaksiId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TransaksiDetail::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Payment::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Transaksi::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Transaksi {
        Table,
        TransaksiId,
        UserId,
        NoRekening,
        AtasNama,
        Bank,
        NamaPenerima,
        NoTelpon,
        Provinsi,
        Kota,
        Kecamatan,
        AlamatLengkap,
        KodePos,
        Type,
        SubtotalProduk,
        SubtotalOngkir,
        Total,
        Status,
        Replied,
        Alasan,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Payment {
        Table,
        PaymentId,
        TransaksiId,
        Status,
        Url,
        Nama,
        Dari,
        Metode,
        Alasan,
        Expired,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum TransaksiDetail {
        Table,
        Id,
        TransaksiId,
        KodeItem,
        NamaProduk,
        Kategori,
        Harga,
        Quantity,
        SubtotalProduk,
    }
}

mod m20240501_000004_create_settings_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240501_000004_create_settings_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BankAccount::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BankAccount::BankId)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankAccount::NoRekening)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(BankAccount::AtasNama).string().not_null())
                        .col(ColumnDef::new(BankAccount::Bank).string().not_null())
                        .col(
                            ColumnDef::new(BankAccount::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BankAccount::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Polling::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Polling::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Polling::Label).string_len(20).not_null())
                        .col(ColumnDef::new(Polling::Url).string().not_null())
                        .col(
                            ColumnDef::new(Polling::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Polling::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Sync::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sync::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Sync::Label).string().not_null())
                        .col(
                            ColumnDef::new(Sync::SynchronizedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Operational::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Operational::Id)
                                .integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Operational::Hari).string().not_null())
                        .col(ColumnDef::new(Operational::JamBuka).string().not_null())
                        .col(ColumnDef::new(Operational::JamTutup).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Operational::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Sync::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Polling::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BankAccount::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum BankAccount {
        Table,
        BankId,
        NoRekening,
        AtasNama,
        Bank,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Polling {
        Table,
        Id,
        Label,
        Url,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum Sync {
        Table,
        Id,
        Label,
        SynchronizedAt,
    }

    #[derive(Iden)]
    enum Operational {
        Table,
        Id,
        Hari,
        JamBuka,
        JamTutup,
    }
}
