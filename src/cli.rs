//! # 命令行公共处理
//!
//! 两个工具的参数错误统一以退出码 1 结束（clap 自带的 `exit()` 使用 2），
//! `--help` / `--version` 以 0 结束。

use std::process::ExitCode;

/// 参数解析失败时的退出码：真正的用法错误为 1，帮助与版本信息为 0。
pub fn usage_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// 打印 clap 的用法/帮助信息并给出退出码。
pub fn report_usage(err: &clap::Error) -> ExitCode {
    if let Err(io_err) = err.print() {
        eprintln!("{}\n(无法写出帮助信息：{})", err, io_err);
    }
    usage_exit_code(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(name = "tool", version)]
    struct Args {
        input: String,
        output: String,
    }

    #[test]
    fn wrong_argument_count_exits_with_one() {
        let err = Args::try_parse_from(["tool", "only-one"]).expect_err("parse should fail");

        assert_eq!(usage_exit_code(&err), ExitCode::from(1));
    }

    #[test]
    fn help_and_version_exit_successfully() {
        let help = Args::try_parse_from(["tool", "--help"]).expect_err("help is reported as error");
        let version = Args::try_parse_from(["tool", "--version"]).expect_err("version is reported as error");

        assert_eq!(usage_exit_code(&help), ExitCode::SUCCESS);
        assert_eq!(usage_exit_code(&version), ExitCode::SUCCESS);
    }
}
