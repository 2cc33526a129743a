//! End-to-end shell sessions against a seeded kernel.

use weave_kernel::{Kernel, KernelConfig, OpKind, OpSource};

async fn kernel() -> Kernel {
    Kernel::new(KernelConfig::named("scenarios").with_user("ada"))
        .await
        .expect("kernel")
}

// ============================================================================
// Basic sessions
// ============================================================================

#[tokio::test]
async fn mkdir_touch_ls_rm() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();

    assert!(shell.execute("mkdir /demo").await.ok());
    assert!(shell.execute("cd /demo").await.ok());
    assert!(shell.execute("touch a.txt").await.ok());
    assert!(shell.execute("mkdir sub").await.ok());

    let ls = shell.execute("ls").await;
    assert!(ls.ok(), "{ls:?}");
    assert_eq!(ls.out, "sub/  a.txt\n");

    let rm = shell.execute("rm sub").await;
    assert_eq!(rm.code, 1);
    assert!(rm.err.contains("Is a directory"), "{}", rm.err);

    assert!(shell.execute("rm -r sub").await.ok());
    assert!(shell.execute("rm a.txt").await.ok());
    assert_eq!(shell.execute("ls").await.out, "");
}

#[tokio::test]
async fn echo_redirect_then_cat() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();

    assert!(shell.execute(r#"echo "hello world" > /tmp/greeting"#).await.ok());
    assert!(shell.execute("echo again >> /tmp/greeting").await.ok());

    let cat = shell.execute("cat /tmp/greeting").await;
    assert_eq!(cat.out, "hello world\nagain\n");
    assert_eq!(
        kernel.vfs().get_file_content("/tmp/greeting").unwrap(),
        "hello world\nagain\n"
    );
}

#[tokio::test]
async fn unknown_command_is_127() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    let result = shell.execute("frobnicate --now").await;
    assert_eq!(result.code, 127);
    assert_eq!(result.err, "frobnicate: command not found");
}

#[tokio::test]
async fn syntax_error_is_2() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    let result = shell.execute("echo 'unterminated").await;
    assert_eq!(result.code, 2);
    assert!(result.err.starts_with("weave: "), "{}", result.err);
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn cd_dash_and_home() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    assert_eq!(shell.cwd(), "/home/ada");

    assert!(shell.execute("cd /etc").await.ok());
    let back = shell.execute("cd -").await;
    assert_eq!(back.out, "/home/ada\n");
    assert_eq!(shell.cwd(), "/home/ada");

    assert!(shell.execute("cd /tmp").await.ok());
    assert!(shell.execute("cd").await.ok());
    assert_eq!(shell.execute("pwd").await.out, "/home/ada\n");
}

#[tokio::test]
async fn prompt_abbreviates_home() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    assert_eq!(shell.prompt(), "ada@weave:~$ ");
    shell.execute("cd Documents").await;
    assert_eq!(shell.prompt(), "ada@weave:~/Documents$ ");
    shell.execute("cd /etc").await;
    assert_eq!(shell.prompt(), "ada@weave:/etc$ ");
}

#[tokio::test]
async fn cd_into_file_fails() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    let result = shell.execute("cd /etc/motd").await;
    assert_eq!(result.code, 1);
    assert!(result.err.contains("Not a directory"), "{}", result.err);
    assert_eq!(shell.cwd(), "/home/ada");
}

// ============================================================================
// File management
// ============================================================================

#[tokio::test]
async fn cp_mv_keep_content() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();

    shell.execute("echo data > /tmp/a").await;
    assert!(shell.execute("cp /tmp/a /tmp/b").await.ok());
    assert!(shell.execute("mv /tmp/b /home/ada/c").await.ok());

    assert_eq!(shell.execute("cat /tmp/a").await.out, "data\n");
    assert_eq!(shell.execute("cat c").await.out, "data\n");
    assert!(!kernel.vfs().exists("/tmp/b"));
}

#[tokio::test]
async fn find_and_grep() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();

    let find = shell.execute("find *.txt /home/ada").await;
    assert!(find.out.contains("/home/ada/Documents/welcome.txt"), "{}", find.out);

    shell.execute("echo needle > /tmp/hay").await;
    let grep = shell.execute("grep needle /tmp/hay").await;
    assert_eq!(grep.out, "1:needle\n");
    assert_eq!(shell.execute("grep absent /tmp/hay").await.code, 1);
}

#[tokio::test]
async fn variables_expand_from_environment() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    shell.execute("export GREETING=hi").await;
    let result = shell.execute("echo $GREETING $USER").await;
    assert_eq!(result.out, "hi ada\n");
}

#[tokio::test]
async fn clear_returns_directive() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    assert!(shell.execute("clear").await.clears_screen());
}

// ============================================================================
// Shared notification
// ============================================================================

#[tokio::test]
async fn shell_mutations_are_visible_to_other_surfaces() {
    let kernel = kernel().await;
    let mut shell = kernel.shell();
    shell.execute("mkdir /shared").await;
    shell.execute("touch /shared/x").await;

    let ops: Vec<_> = kernel.vfs().history().into_iter().map(|op| op.kind).collect();
    assert_eq!(ops, [OpKind::FolderCreated, OpKind::FileCreated]);
    assert!(kernel.vfs().history().iter().all(|op| op.source == OpSource::Terminal));

    let mut other = kernel.shell();
    assert!(other.execute("ls /shared").await.out.contains('x'));
}
