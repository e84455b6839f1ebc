//! Transaction sharing between repositories
//!
//! Every repository built for one request holds a clone of the same
//! [`Executor`], so all their statements run inside one PostgreSQL
//! transaction. The transaction is taken out of the executor exactly once,
//! on commit or rollback; repositories that touch the executor afterwards
//! get a "Transaction has been consumed" error.

use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    async fn take(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.tx
            .lock()
            .await
            .take()
            .ok_or_else(|| sqlx::Error::Protocol("Transaction has been consumed".to_string()))
    }
}

/// Anything that can hand out the executor repositories should run on.
pub trait UnitOfWorkSession {
    fn executor(&self) -> &Executor;
}

/// One database transaction. Dropping it without calling [`UnitOfWork::commit`]
/// rolls the transaction back.
pub struct UnitOfWork {
    executor: Executor,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;
        Ok(Self {
            executor: Executor::new(tx),
        })
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.executor.take().await?.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.executor.take().await?.rollback().await
    }
}

impl UnitOfWorkSession for UnitOfWork {
    fn executor(&self) -> &Executor {
        &self.executor
    }
}
