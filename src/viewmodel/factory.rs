use std::sync::Arc;

use tokio::runtime::Handle;

use crate::database::UnitStore;
use crate::error::Result;
use crate::viewmodel::unit_list::UnitListViewModel;

/// 机体列表视图模型的工厂
///
/// 持有应用范围内共享的存储，每次创建的视图模型都使用同一个存储。
#[derive(Clone)]
pub struct UnitListViewModelFactory {
    store: Arc<dyn UnitStore>,
}

impl UnitListViewModelFactory {
    pub fn new(store: Arc<dyn UnitStore>) -> Self {
        Self { store }
    }

    /// 在当前 Tokio 运行时上创建视图模型
    ///
    /// 必须在运行时上下文中调用，否则返回 [`TrackerError::Runtime`](crate::error::TrackerError::Runtime)。
    pub fn create(&self) -> Result<UnitListViewModel> {
        let runtime = Handle::try_current()?;
        Ok(self.create_on(runtime))
    }

    /// 在指定的运行时上创建视图模型
    pub fn create_on(&self, runtime: Handle) -> UnitListViewModel {
        UnitListViewModel::new(Arc::clone(&self.store), runtime)
    }
}
