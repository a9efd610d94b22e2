pub mod address;
pub mod bank_account;
pub mod banner;
pub mod cart;
pub mod category;
pub mod operational;
pub mod operator;
pub mod order;
pub mod order_line;
pub mod payment;
pub mod polling;
pub mod product;
pub mod product_image;
pub mod sync_log;
pub mod user;

// Re-export entities
pub use address::{Entity as Address, Model as AddressModel};
pub use bank_account::{Entity as BankAccount, Model as BankAccountModel};
pub use banner::{Entity as Banner, Model as BannerModel};
pub use cart::{Entity as Cart, Model as CartModel};
pub use category::{Entity as Category, Model as CategoryModel};
pub use operational::{Entity as Operational, Model as OperationalModel};
pub use operator::{Entity as Operator, Model as OperatorModel};
pub use order::{Entity as Order, FulfillmentType, Model as OrderModel, OrderStatus};
pub use order_line::{Entity as OrderLine, Model as OrderLineModel};
pub use payment::{Entity as Payment, Model as PaymentModel, PaymentStatus};
pub use polling::{Entity as Polling, Model as PollingModel, PollingLabel};
pub use product::{Entity as Product, Model as ProductModel};
pub use product_image::{Entity as ProductImage, Model as ProductImageModel};
pub use sync_log::{Entity as SyncLog, Model as SyncLogModel};
pub use user::{Entity as User, Model as UserModel};
