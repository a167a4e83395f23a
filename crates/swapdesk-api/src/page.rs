//! Swap page HTML
//!
//! Self-contained HTML/JS page bound to the API: a connect button, the
//! amount input, the quoted output, a swap button, and a status line.

use swapdesk_core::{shorten_address, AppConfig};

/// Generate the swap page HTML
///
/// The page will:
/// 1. Load the current view from /view
/// 2. Connect or disconnect the wallet on button click
/// 3. POST /quote on every input event, rendering only the latest reply
/// 4. POST /swap, polling /view for progress until it resolves
pub fn render_page(config: &AppConfig) -> String {
    let network = escape_html(config.chain.network.as_str());
    let router = shorten_address(&config.chain.router);
    let input_token = shorten_address(&config.chain.input_token);
    let output_token = shorten_address(&config.chain.output_token);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Swapdesk</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            color: #fff;
        }}
        .container {{
            background: rgba(255,255,255,0.05);
            border-radius: 16px;
            padding: 40px;
            max-width: 480px;
            width: 90%;
            border: 1px solid rgba(255,255,255,0.1);
        }}
        header {{ display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }}
        h1 {{ font-size: 24px; }}
        .network {{ color: rgba(255,255,255,0.6); font-size: 12px; margin-top: 4px; }}
        label {{ display: block; font-size: 13px; color: rgba(255,255,255,0.7); margin: 16px 0 6px; }}
        input {{
            width: 100%; padding: 12px; border-radius: 8px;
            border: 1px solid rgba(255,255,255,0.15);
            background: rgba(0,0,0,0.3); color: #fff; font-size: 18px;
        }}
        .token {{ font-family: monospace; font-size: 11px; color: rgba(255,255,255,0.5); }}
        button {{
            background: #3b82f6; color: white; border: none;
            padding: 12px 24px; border-radius: 8px;
            font-size: 16px; cursor: pointer; transition: background 0.2s;
        }}
        button:hover {{ background: #2563eb; }}
        button:disabled {{ background: #475569; cursor: not-allowed; }}
        #swapButton {{ width: 100%; margin-top: 24px; }}
        .link {{ background: none; padding: 4px 0; font-size: 12px; color: rgba(255,255,255,0.6); }}
        .link:hover {{ background: none; color: #fff; }}
        .status {{
            margin-top: 20px; padding: 16px; border-radius: 8px;
            font-size: 14px; min-height: 20px; word-break: break-word;
        }}
        .status.info {{ background: rgba(59, 130, 246, 0.2); border: 1px solid rgba(59, 130, 246, 0.3); }}
        .status.success {{ background: rgba(34, 197, 94, 0.2); border: 1px solid rgba(34, 197, 94, 0.3); }}
        .status.error {{ background: rgba(239, 68, 68, 0.2); border: 1px solid rgba(239, 68, 68, 0.3); }}
        .status a {{ color: #93c5fd; margin-left: 6px; }}
        .hidden {{ display: none; }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <div>
                <h1>Swapdesk</h1>
                <div class="network">{network} &middot; router {router}</div>
            </div>
            <div>
                <button id="connectButton">Connect Wallet</button>
                <button id="disconnectButton" class="link hidden">Disconnect</button>
            </div>
        </header>

        <label for="fromAmount">You pay <span class="token">{input_token}</span></label>
        <input id="fromAmount" type="text" inputmode="decimal" placeholder="0.0" autocomplete="off">

        <label for="toAmount">You receive <span class="token">{output_token}</span></label>
        <input id="toAmount" type="text" placeholder="0.0" readonly>

        <button id="swapButton" disabled>Swap</button>

        <div id="status" class="status hidden"></div>
    </div>

    <script>
        const connectButton = document.getElementById('connectButton');
        const disconnectButton = document.getElementById('disconnectButton');
        const swapButton = document.getElementById('swapButton');
        const fromAmount = document.getElementById('fromAmount');
        const toAmount = document.getElementById('toAmount');
        const statusEl = document.getElementById('status');
        let quoteSeq = 0;
        let swapDone = false;

        async function api(path, body) {{
            const init = body === undefined
                ? {{ method: path === '/view' ? 'GET' : 'POST' }}
                : {{ method: 'POST', headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify(body) }};
            const res = await fetch(path, init);
            return res.json();
        }}

        function render(view, keepInput) {{
            connectButton.textContent = view.connect_label;
            disconnectButton.classList.toggle('hidden', view.connect_label === 'Connect Wallet');
            swapButton.disabled = !view.swap_enabled;
            if (!keepInput) fromAmount.value = view.from_amount;
            toAmount.value = view.to_amount;

            statusEl.textContent = view.status.text;
            statusEl.className = 'status ' + view.status.severity;
            statusEl.classList.toggle('hidden', view.status.text === '');
            if (view.status.link) {{
                const a = document.createElement('a');
                a.href = view.status.link.href;
                a.target = '_blank';
                a.rel = 'noopener';
                a.textContent = view.status.link.label;
                statusEl.appendChild(a);
            }}
        }}

        connectButton.addEventListener('click', async () => {{
            render(await api('/wallet/connect'));
        }});

        disconnectButton.addEventListener('click', async () => {{
            render(await api('/wallet/disconnect'));
        }});

        fromAmount.addEventListener('input', async () => {{
            const seq = ++quoteSeq;
            const view = await api('/quote', {{ amount: fromAmount.value }});
            if (seq === quoteSeq) render(view, true);
        }});

        swapButton.addEventListener('click', async () => {{
            swapButton.disabled = true;
            swapDone = false;
            const poll = setInterval(async () => {{
                const view = await api('/view');
                if (!swapDone) render(view, true);
            }}, 1000);
            try {{
                const view = await api('/swap');
                swapDone = true;
                render(view);
            }} finally {{
                swapDone = true;
                clearInterval(poll);
            }}
        }});

        api('/view').then(view => render(view));
    </script>
</body>
</html>"#
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_binds_elements() {
        let html = render_page(&AppConfig::default());
        for id in ["connectButton", "swapButton", "fromAmount", "toAmount", "status"] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing {}", id);
        }
        assert!(html.contains("sepolia"));
        assert!(html.contains("...4008"));
    }

    #[test]
    fn test_swap_poll_stops_rendering_after_reply() {
        let html = render_page(&AppConfig::default());
        let poll = html.find("setInterval").expect("progress poll");
        let reply = html.find("await api('/swap')").expect("swap request");
        assert!(html[poll..reply].contains("if (!swapDone) render(view, true);"));
        assert!(html[reply..].contains("swapDone = true;"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
