//! 仿真核心模块
//!
//! 此模块包含离散事件仿真的核心组件：仿真时间、事件、事件队列、随机变量源、
//! 调度句柄、观察者和仿真器。

// 子模块声明
mod event;
mod event_queue;
mod observer;
mod scheduled_event;
mod scheduler;
mod simulator;
mod time;
mod variate;

// 重新导出公共接口
pub use event::{CustomerId, Event, EventKind};
pub use event_queue::EventQueue;
pub use observer::{NoopObserver, Observer, TraceEntry, TraceRecorder};
pub use scheduled_event::ScheduledEvent;
pub use scheduler::Scheduler;
pub use simulator::{Phase, RunReport, Simulator};
pub use time::SimTime;
pub use variate::{FixedDraws, SeededSource, UniformSource, Variates};
