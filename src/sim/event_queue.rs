//! 事件队列
//!
//! 显式的二叉最小堆，按 `(time, seq)` 排序。插入与取最小值均为 O(log n)。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;

#[derive(Debug, Default)]
pub struct EventQueue {
    heap: Vec<ScheduledEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入事件：放到最后一个位置再上浮。
    pub fn insert(&mut self, ev: Event) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(ScheduledEvent {
            at: ev.time,
            seq,
            ev,
        });
        self.sift_up(self.heap.len() - 1);
    }

    /// 取出最早的事件；队列为空时返回 `None`。
    pub fn extract_min(&mut self) -> Option<ScheduledEvent> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min
    }

    pub fn peek(&self) -> Option<&ScheduledEvent> {
        self.heap.first()
    }

    pub fn peek_time(&self) -> Option<SimTime> {
        self.peek().map(ScheduledEvent::at)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    /// 清空队列并重置序号，使下一次运行的平局顺序与首次一致。
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    /// 检查堆性质：每个非叶节点不大于其子节点。
    pub fn is_valid_heap(&self) -> bool {
        (0..self.heap.len()).all(|i| {
            let l = 2 * i + 1;
            let r = 2 * i + 2;
            (l >= self.heap.len() || self.heap[i] <= self.heap[l])
                && (r >= self.heap.len() || self.heap[i] <= self.heap[r])
        })
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[parent] <= self.heap[idx] {
                break;
            }
            self.heap.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let l = 2 * idx + 1;
            let r = 2 * idx + 2;
            let mut smallest = idx;
            if l < len && self.heap[l] < self.heap[smallest] {
                smallest = l;
            }
            if r < len && self.heap[r] < self.heap[smallest] {
                smallest = r;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }
}
