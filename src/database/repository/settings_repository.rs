use crate::entity::prelude::*;
use crate::entity::settings;
use sea_orm::*;

/// 用户设置仓库
pub struct SettingsRepository;

impl SettingsRepository {
    /// 确保设置记录存在（ID 固定为 1）
    async fn ensure_settings_exist(db: &DatabaseConnection) -> Result<settings::Model, DbErr> {
        if let Some(existing) = Settings::find_by_id(1).one(db).await? {
            return Ok(existing);
        }

        let record = settings::ActiveModel {
            id: Set(1),
            last_account_id: Set(None),
            db_backup_path: Set(None),
        };

        record.insert(db).await
    }

    /// 获取上次选择的账号
    pub async fn get_last_account_id(db: &DatabaseConnection) -> Result<Option<i32>, DbErr> {
        Ok(Self::ensure_settings_exist(db).await?.last_account_id)
    }

    /// 记录当前选择的账号
    pub async fn set_last_account_id(
        db: &DatabaseConnection,
        account_id: Option<i32>,
    ) -> Result<(), DbErr> {
        let record = Self::ensure_settings_exist(db).await?;

        let mut active: settings::ActiveModel = record.into();
        active.last_account_id = Set(account_id);

        active.update(db).await?;
        Ok(())
    }

    /// 获取数据库备份路径（未设置时返回空字符串）
    pub async fn get_db_backup_path(db: &DatabaseConnection) -> Result<String, DbErr> {
        Ok(Self::ensure_settings_exist(db)
            .await?
            .db_backup_path
            .unwrap_or_default())
    }

    /// 设置数据库备份路径
    pub async fn set_db_backup_path(db: &DatabaseConnection, path: String) -> Result<(), DbErr> {
        let record = Self::ensure_settings_exist(db).await?;

        let mut active: settings::ActiveModel = record.into();
        active.db_backup_path = Set(if path.trim().is_empty() {
            None
        } else {
            Some(path)
        });

        active.update(db).await?;
        Ok(())
    }
}
