//! 控制台应用
//!
//! 菜单循环：读一行输入 → 调用仓库 / 抽题 / 查询服务 → 渲染结果。
//! 输入来自任意 `AsyncBufRead`，输出写到任意 `Write`，方便测试时整段脚本驱动。

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::console::gate::ModeratorGate;
use crate::console::render;
use crate::models::{QuestionId, QuestionStatus, SortMode};
use crate::services::{draw_one, visible_view, QuestionStore};

/// 控制台应用主结构
pub struct ConsoleApp<R, W> {
    store: QuestionStore,
    author_label: String,
    gate: ModeratorGate,
    is_moderator: bool,
    input: R,
    output: W,
    pause: Duration,
}

/// 浏览列表中的一项：序号对应的题目ID和当时的状态
struct Listed {
    id: QuestionId,
    approved: bool,
    highlighted: bool,
}

impl<R, W> ConsoleApp<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        store: QuestionStore,
        author_label: impl Into<String>,
        gate: ModeratorGate,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            author_label: author_label.into(),
            gate,
            is_moderator: false,
            input,
            output,
            pause: Duration::from_millis(800),
        }
    }

    /// 设置提示信息显示后的停顿时间
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn into_store(self) -> QuestionStore {
        self.store
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn is_moderator(&self) -> bool {
        self.is_moderator
    }

    /// 运行主循环，直到选择退出或输入结束
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let header = render::header(&self.author_label, self.is_moderator);
            let menu = render::main_menu(self.is_moderator);
            self.write(&header)?;
            self.write(&menu)?;

            let Some(choice) = self.prompt("请选择").await? else {
                break;
            };

            match (choice.as_str(), self.is_moderator) {
                ("0", _) => break,
                ("1", _) => self.add_question().await?,
                ("2", _) => self.pick_random().await?,
                ("3", _) => self.browse().await?,
                ("4", true) => self.moderator_controls().await?,
                ("4", false) => self.enter_moderator_mode().await?,
                ("5", true) => {
                    self.is_moderator = false;
                    info!("{} 退出管理模式", self.author_label);
                    self.notice("已退出管理模式。").await?;
                }
                _ => self.notice("无效选项，请重试。").await?,
            }
        }

        self.write("感谢使用棉花糖，再见！\n")?;
        Ok(())
    }

    // ========== 各个菜单 ==========

    async fn add_question(&mut self) -> Result<()> {
        let intro = format!(
            "=== 提一个问题 ===\n请输入你的匿名问题，显示身份为: {}\n",
            self.author_label
        );
        self.write(&intro)?;

        let Some(text) = self.prompt(">").await? else {
            return Ok(());
        };

        if self.store.add(&text, &self.author_label) {
            self.notice("✓ 你的问题已经投进去了！").await
        } else {
            self.notice("请先输入问题再提交。").await
        }
    }

    async fn pick_random(&mut self) -> Result<()> {
        self.write("=== 随机抽一个问题 ===\n")?;

        let picked = draw_one(&mut self.store).map(|q| (q.id, render::question(q, None, false)));
        let Some((id, rendered)) = picked else {
            return self.notice("还没有可以抽的问题，来提第一个吧！").await;
        };

        self.write(&rendered)?;
        let choice = self.prompt("输入 v 投票，其他键返回").await?;
        if is_key(choice.as_deref(), "v") {
            self.vote(id).await?;
        }
        Ok(())
    }

    async fn browse(&mut self) -> Result<()> {
        loop {
            self.write("=== 全部问题 ===\n")?;
            self.write(&render::sort_menu())?;

            let Some(choice) = self.prompt("请选择").await? else {
                return Ok(());
            };
            let mode = match choice.as_str() {
                "0" => return Ok(()),
                "2" => SortMode::Votes,
                "3" => SortMode::Random,
                _ => SortMode::Newest,
            };

            let view = visible_view(&self.store, mode, self.is_moderator);
            if view.is_empty() {
                return self.notice("还没有人提问，来做第一个吧！").await;
            }

            let mut listing = format!("=== 全部问题 (按{}) ===\n", mode.label());
            let mut listed = Vec::with_capacity(view.len());
            for (i, q) in view.iter().enumerate() {
                listing.push_str(&render::question(q, Some(i + 1), self.is_moderator));
                listed.push(Listed {
                    id: q.id,
                    approved: q.is_approved(),
                    highlighted: q.highlighted,
                });
            }
            self.write(&listing)?;
            self.write(&render::browse_actions(self.is_moderator))?;

            let Some(action) = self.prompt("请选择操作").await? else {
                return Ok(());
            };
            self.browse_action(&action.to_lowercase(), &listed).await?;
        }
    }

    async fn browse_action(&mut self, action: &str, listed: &[Listed]) -> Result<()> {
        let moderator_only = matches!(action, "h" | "s" | "p" | "d");
        if action == "b" || (moderator_only && !self.is_moderator) {
            return Ok(());
        }
        if action != "v" && !moderator_only {
            return self.notice("无效选项，请重试。").await;
        }

        let Some(item) = self.pick_listed(listed).await? else {
            return Ok(());
        };

        match action {
            "v" => self.vote(item.id).await,
            "h" => {
                let status = if item.approved {
                    QuestionStatus::Pending
                } else {
                    QuestionStatus::Approved
                };
                self.store.set_status(item.id, status);
                info!("管理员将题目 {} 设为 {}", item.id, status);
                self.notice("✓ 问题状态已更新！").await
            }
            "s" => {
                self.store.set_highlighted(item.id, !item.highlighted);
                self.notice("✓ 高亮状态已更新！").await
            }
            "p" => {
                self.store.force_to_top(item.id);
                info!("管理员置顶题目 {}", item.id);
                self.notice("✓ 已置顶！").await
            }
            _ => {
                let confirm = self.prompt("确定要删除这个问题吗？(y/n)").await?;
                if is_key(confirm.as_deref(), "y") {
                    self.store.delete(item.id);
                    self.notice("✓ 问题已删除！").await
                } else {
                    Ok(())
                }
            }
        }
    }

    async fn moderator_controls(&mut self) -> Result<()> {
        loop {
            self.write("=== 管理操作 ===\n1. 清空全部问题\n0. 返回主菜单\n")?;
            let Some(choice) = self.prompt("请选择").await? else {
                return Ok(());
            };
            match choice.as_str() {
                "0" => return Ok(()),
                "1" => {
                    let confirm = self.prompt("确定要删除全部问题吗？(y/n)").await?;
                    if is_key(confirm.as_deref(), "y") {
                        self.store.clear_all();
                        self.notice("✓ 已清空全部问题！").await?;
                    }
                }
                _ => self.notice("无效选项，请重试。").await?,
            }
        }
    }

    async fn enter_moderator_mode(&mut self) -> Result<()> {
        self.write("=== 进入管理模式 ===\n")?;
        let Some(passphrase) = self.prompt("请输入管理口令").await? else {
            return Ok(());
        };

        if self.gate.verify(&passphrase) {
            self.is_moderator = true;
            info!("{} 进入管理模式", self.author_label);
            self.notice("✓ 已进入管理模式！").await
        } else {
            warn!("{} 管理口令错误", self.author_label);
            self.notice("口令错误。").await
        }
    }

    // ========== 辅助方法 ==========

    async fn vote(&mut self, id: QuestionId) -> Result<()> {
        if self.store.vote(id) {
            self.notice("✓ 投票成功！").await
        } else {
            self.notice("这个问题已经不存在了。").await
        }
    }

    /// 读取列表序号，返回对应的条目
    async fn pick_listed<'a>(&mut self, listed: &'a [Listed]) -> Result<Option<&'a Listed>> {
        let Some(raw) = self.prompt("请输入问题序号").await? else {
            return Ok(None);
        };
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 && n <= listed.len() => Ok(Some(&listed[n - 1])),
            Ok(_) => {
                self.notice("序号无效。").await?;
                Ok(None)
            }
            Err(_) => {
                self.notice("请输入有效的数字。").await?;
                Ok(None)
            }
        }
    }

    /// 输出提示并读取一行；输入结束时返回 `None`
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            debug!("输入结束");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "\n{}", message)?;
        self.output.flush()?;
        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}

fn is_key(input: Option<&str>, key: &str) -> bool {
    input.map(|s| s.eq_ignore_ascii_case(key)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_script(store: QuestionStore, script: &str) -> (QuestionStore, String, bool) {
        let mut app = ConsoleApp::new(
            store,
            "Silver Penguin",
            ModeratorGate::new("instructor"),
            script.as_bytes(),
            Vec::new(),
        )
        .with_pause(Duration::ZERO);
        app.run().await.unwrap();
        let moderator = app.is_moderator();
        let output = String::from_utf8(app.output().clone()).unwrap();
        (app.into_store(), output, moderator)
    }

    #[tokio::test]
    async fn test_add_and_exit() {
        let store = QuestionStore::in_memory(QuestionStatus::Approved);
        let (store, output, _) = run_script(store, "1\n什么是生命周期？\n1\n   \n0\n").await;

        assert_eq!(store.len(), 1);
        assert_eq!(store.questions()[0].author_label, "Silver Penguin");
        assert!(output.contains("你的问题已经投进去了"));
        assert!(output.contains("请先输入问题再提交"));
        assert!(output.contains("再见"));
    }

    #[tokio::test]
    async fn test_eof_exits_cleanly() {
        let store = QuestionStore::in_memory(QuestionStatus::Approved);
        let (_, output, _) = run_script(store, "1\n").await;
        assert!(output.contains("再见"));
    }

    #[tokio::test]
    async fn test_draw_and_vote() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Approved);
        store.add("唯一的问题", "Red Fox");
        let (store, output, _) = run_script(store, "2\nv\n0\n").await;

        assert!(output.contains("\"唯一的问题\""));
        assert_eq!(store.get(QuestionId(0)).unwrap().votes, 1);
    }

    #[tokio::test]
    async fn test_draw_with_nothing_approved() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Pending);
        store.add("还在审核", "Red Fox");
        let (_, output, _) = run_script(store, "2\n0\n").await;
        assert!(output.contains("还没有可以抽的问题"));
    }

    #[tokio::test]
    async fn test_pending_hidden_from_visitors() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Approved);
        store.add("公开的问题", "Red Fox");
        store.add("隐藏的问题", "Red Fox");
        store.set_status(QuestionId(1), QuestionStatus::Pending);

        let (_, output, _) = run_script(store, "3\n1\nb\n0\n0\n").await;
        assert!(output.contains("公开的问题"));
        assert!(!output.contains("隐藏的问题"));
    }

    #[tokio::test]
    async fn test_wrong_passphrase() {
        let store = QuestionStore::in_memory(QuestionStatus::Approved);
        let (_, output, moderator) = run_script(store, "4\nletmein\n0\n").await;
        assert!(!moderator);
        assert!(output.contains("口令错误"));
    }

    #[tokio::test]
    async fn test_moderator_approves_highlights_and_deletes() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Pending);
        store.add("第一个", "Red Fox");
        store.add("第二个", "Red Fox");

        // 都是 0 票，按票数排序时序号就是提交顺序
        let script = "4\ninstructor\n\
                      3\n2\nh\n1\n\
                      2\ns\n1\n\
                      2\nd\n2\ny\n\
                      0\n0\n";
        let (store, _, moderator) = run_script(store, script).await;

        assert!(moderator);
        assert_eq!(store.len(), 1);
        let first = store.get(QuestionId(0)).unwrap();
        assert_eq!(first.status, QuestionStatus::Approved);
        assert!(first.highlighted);
        assert!(store.get(QuestionId(1)).is_none());
    }

    #[tokio::test]
    async fn test_visitor_cannot_delete() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Approved);
        store.add("留着我", "Red Fox");
        let (store, _, _) = run_script(store, "3\n1\nd\n0\n0\n").await;
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_moderator_clear_all() {
        let mut store = QuestionStore::in_memory(QuestionStatus::Approved);
        store.add("a", "Red Fox");
        store.add("b", "Red Fox");
        let (store, output, _) = run_script(store, "4\ninstructor\n4\n1\ny\n0\n5\n0\n").await;

        assert!(store.is_empty());
        assert_eq!(store.next_id(), 0);
        assert!(output.contains("已清空全部问题"));
        assert!(output.contains("已退出管理模式"));
    }
}
