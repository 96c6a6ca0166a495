//! 机体列表视图模型
//!
//! 持有三个输入单元（当前账号、检索关键字、刷新信号），任一输入变化时
//! 调用同一个重新计算函数 [`UnitListViewModel::reload`]，按
//! (当前账号, 当前关键字) 重新查询并发布结果。
//!
//! 查询在 Tokio 运行时上异步执行。每次重新计算都会领取一个递增的序号，
//! 查询完成时只有序号仍为最新才会发布结果，较早发出但较晚完成的查询会被丢弃。
//!
//! 写操作（更新持有记录、增删账号、导入主数据）只写数据库，不会更新列表输出，
//! 调用方需要在写入后调用 [`UnitListViewModel::refresh_data`]。

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::database::UnitStore;
use crate::database::dto::UserUnitWithMaster;
use crate::entity::{account, master_unit, user_unit};
use crate::error::Result;

/// 列表加载状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// 未选择账号
    Unselected,
    Loading,
    Loaded,
    /// 最近一次查询失败，列表保留上一次的结果
    Failed(String),
}

/// 由查询任务共享的发布端
struct Published {
    /// 最新一次重新计算的序号，检查与发布都在此锁内完成
    generation: Mutex<u64>,
    units: watch::Sender<Vec<UserUnitWithMaster>>,
    state: watch::Sender<LoadState>,
}

impl Published {
    /// 仅当 `ticket` 仍为最新序号时发布查询结果
    fn publish(
        &self,
        ticket: u64,
        result: std::result::Result<Vec<UserUnitWithMaster>, sea_orm::DbErr>,
    ) {
        let generation = self.generation.lock();
        if *generation != ticket {
            log::debug!("丢弃过期的查询结果 (#{}，当前 #{})", ticket, *generation);
            return;
        }

        match result {
            Ok(rows) => {
                log::debug!("查询 #{} 完成，共 {} 条", ticket, rows.len());
                self.units.send_replace(rows);
                self.state.send_replace(LoadState::Loaded);
            }
            Err(e) => {
                log::error!("检索持有记录失败: {}", e);
                self.state.send_replace(LoadState::Failed(e.to_string()));
            }
        }
    }
}

/// 账号列表的发布端，与 [`Published`] 一样按序号丢弃过期的加载结果
struct PublishedAccounts {
    generation: Mutex<u64>,
    list: watch::Sender<Vec<account::Model>>,
}

impl PublishedAccounts {
    /// 领取新的加载序号，之前领取的序号随即失效
    fn next_ticket(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        *generation
    }

    /// 仅当 `ticket` 仍为最新序号时发布账号列表
    fn publish(&self, ticket: u64, list: Vec<account::Model>) {
        let generation = self.generation.lock();
        if *generation != ticket {
            log::debug!("丢弃过期的账号列表 (#{}，当前 #{})", ticket, *generation);
            return;
        }
        self.list.send_replace(list);
    }
}

pub struct UnitListViewModel {
    store: Arc<dyn UnitStore>,
    runtime: Handle,

    // === 输入 ===
    current_account_id: watch::Sender<Option<i32>>,
    search_text: watch::Sender<String>,
    refresh_trigger: watch::Sender<u64>,

    // === 输出 ===
    published: Arc<Published>,
    accounts: Arc<PublishedAccounts>,
}

impl UnitListViewModel {
    /// 创建视图模型，查询任务运行在 `runtime` 上
    ///
    /// 初始状态为未选择账号，列表为空；账号列表会在后台加载一次。
    pub fn new(store: Arc<dyn UnitStore>, runtime: Handle) -> Self {
        let view_model = Self {
            store,
            runtime,
            current_account_id: watch::channel(None).0,
            search_text: watch::channel(String::new()).0,
            refresh_trigger: watch::channel(0).0,
            published: Arc::new(Published {
                generation: Mutex::new(0),
                units: watch::channel(Vec::new()).0,
                state: watch::channel(LoadState::Unselected).0,
            }),
            accounts: Arc::new(PublishedAccounts {
                generation: Mutex::new(0),
                list: watch::channel(Vec::new()).0,
            }),
        };

        let store = Arc::clone(&view_model.store);
        let accounts = Arc::clone(&view_model.accounts);
        let ticket = accounts.next_ticket();
        view_model.runtime.spawn(async move {
            match store.find_all_accounts().await {
                Ok(list) => accounts.publish(ticket, list),
                Err(e) => log::error!("加载账号列表失败: {}", e),
            }
        });

        view_model
    }

    // ==================== 输入 ====================

    /// 设置当前账号
    ///
    /// 设为 `None` 时同步清空列表；否则重新查询。
    pub fn set_current_account(&self, account_id: Option<i32>) {
        self.current_account_id.send_replace(account_id);
        self.reload();
    }

    /// 设置检索关键字
    pub fn set_search_text(&self, search_text: impl Into<String>) {
        self.search_text.send_replace(search_text.into());
        self.reload();
    }

    /// 按当前账号和关键字重新查询
    pub fn refresh_data(&self) {
        self.refresh_trigger.send_modify(|count| *count += 1);
        self.reload();
    }

    /// 重新计算列表，由三个输入共用
    fn reload(&self) {
        let account_id = *self.current_account_id.borrow();
        let query = self.search_text.borrow().clone();

        let mut generation = self.published.generation.lock();
        *generation += 1;
        let ticket = *generation;

        let Some(account_id) = account_id else {
            self.published.units.send_replace(Vec::new());
            self.published.state.send_replace(LoadState::Unselected);
            return;
        };

        self.published.state.send_replace(LoadState::Loading);
        drop(generation);

        log::debug!(
            "查询 #{}: account={} query={:?}",
            ticket,
            account_id,
            query
        );

        let store = Arc::clone(&self.store);
        let published = Arc::clone(&self.published);
        self.runtime.spawn(async move {
            let result = store.search_user_units(account_id, &query).await;
            published.publish(ticket, result);
        });
    }

    // ==================== 输出 ====================

    /// 当前列表
    pub fn units(&self) -> watch::Receiver<Vec<UserUnitWithMaster>> {
        self.published.units.subscribe()
    }

    pub fn load_state(&self) -> watch::Receiver<LoadState> {
        self.published.state.subscribe()
    }

    pub fn accounts(&self) -> watch::Receiver<Vec<account::Model>> {
        self.accounts.list.subscribe()
    }

    pub fn current_account(&self) -> watch::Receiver<Option<i32>> {
        self.current_account_id.subscribe()
    }

    pub fn search_text(&self) -> watch::Receiver<String> {
        self.search_text.subscribe()
    }

    /// 当前列表的快照
    pub fn snapshot(&self) -> Vec<UserUnitWithMaster> {
        self.published.units.borrow().clone()
    }

    /// 等待当前查询结束（不处于 Loading），返回此时的列表
    pub async fn settled(&self) -> Vec<UserUnitWithMaster> {
        let mut state = self.published.state.subscribe();
        if let Err(e) = state
            .wait_for(|state| !matches!(state, LoadState::Loading))
            .await
        {
            log::warn!("加载状态通道已关闭: {}", e);
        }
        self.snapshot()
    }

    // ==================== 写操作 ====================

    /// 重新加载账号列表
    ///
    /// 返回本次查询的结果；若期间有更新的加载已经发出，输出不会被本次结果覆盖。
    pub async fn load_accounts(&self) -> Result<Vec<account::Model>> {
        let ticket = self.accounts.next_ticket();
        let list = self.store.find_all_accounts().await?;
        self.accounts.publish(ticket, list.clone());
        Ok(list)
    }

    /// 新建账号，并为所有已知主数据创建初始持有记录
    pub async fn add_account(&self, account_name: impl Into<String>) -> Result<i32> {
        let account_name = account_name.into();
        let account_id = self.store.insert_account(account_name.clone()).await?;
        log::info!("创建账号 {} ({})", account_name, account_id);

        if account_id > 0 {
            let initial_units = self.initial_units_for(account_id).await?;
            let count = self.store.insert_user_units_replace(initial_units).await?;
            log::debug!("账号 {} 初始化持有记录 {} 条", account_id, count);
        }

        self.load_accounts().await?;
        Ok(account_id)
    }

    /// 删除账号及其持有记录
    ///
    /// 若删除的是当前账号，同时取消选择（列表同步清空）。
    pub async fn delete_account(&self, account_id: i32) -> Result<u64> {
        let removed = self.store.delete_account(account_id).await?;
        log::info!("删除账号 {}", account_id);

        let was_selected = *self.current_account_id.borrow() == Some(account_id);
        if was_selected {
            self.set_current_account(None);
        }

        self.load_accounts().await?;
        Ok(removed)
    }

    /// 保存持有记录的变更
    pub async fn update_user_unit(&self, unit: user_unit::Model) -> Result<()> {
        log::debug!(
            "更新持有记录: account={} unit={} breakthrough={} manuals={}",
            unit.account_id,
            unit.unit_name,
            unit.break_through_count,
            unit.technical_manual_count
        );
        self.store.upsert_user_unit(unit).await?;
        Ok(())
    }

    /// 写入主数据，并为指定账号补充缺失的持有记录（已有记录保持不变）
    pub async fn update_master_units(
        &self,
        units: Vec<master_unit::Model>,
        account_id: i32,
    ) -> Result<u64> {
        self.store.insert_master_units_replace(units).await?;

        let initial_units = self.initial_units_for(account_id).await?;
        let added = self
            .store
            .insert_user_units_ignore_conflicts(initial_units)
            .await?;
        log::info!("账号 {} 新增持有记录 {} 条", account_id, added);
        Ok(added)
    }

    /// 写入初始主数据
    pub async fn insert_initial_master_units(&self, units: Vec<master_unit::Model>) -> Result<u64> {
        let count = self.store.insert_master_units_replace(units).await?;
        log::info!("写入主数据 {} 条", count);
        Ok(count)
    }

    async fn initial_units_for(&self, account_id: i32) -> Result<Vec<user_unit::Model>> {
        let master_units = self.store.find_all_master_units().await?;
        Ok(master_units
            .into_iter()
            .map(|master_unit| user_unit::Model::initial(account_id, master_unit.unit_name))
            .collect())
    }
}
