//! Built-in starter dashboards offered by the templates panel.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateCategory {
    Analytics,
    Ecommerce,
    Saas,
    Admin,
    Crm,
    Iot,
}

impl TemplateCategory {
    pub const ALL: [Self; 6] = [Self::Saas, Self::Ecommerce, Self::Crm, Self::Admin, Self::Analytics, Self::Iot];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Analytics => "Analytics",
            Self::Ecommerce => "E-commerce",
            Self::Saas => "SaaS",
            Self::Admin => "Admin",
            Self::Crm => "CRM",
            Self::Iot => "IoT",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TemplateCategory,
    pub description: &'static str,
    pub html: &'static str,
}

pub static TEMPLATES: [DashboardTemplate; 4] = [
    DashboardTemplate {
        id: "saas-analytics",
        name: "SaaS Analytics",
        category: TemplateCategory::Saas,
        description: "Modern dashboard for tracking MRR, churn, and user growth",
        html: r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>SaaS Analytics</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: system-ui, sans-serif; display: flex; min-height: 100vh; background: #f8fafc; color: #0f172a; }
.sidebar { width: 240px; background: #1e293b; color: #fff; padding: 24px; }
.sidebar a { display: block; padding: 10px 14px; color: #cbd5e1; text-decoration: none; border-radius: 8px; }
.sidebar a.active { background: #334155; color: #fff; }
.main { flex: 1; padding: 32px; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 24px 0; }
.stat-card { background: #fff; padding: 20px; border-radius: 12px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.stat-card .value { font-size: 1.8rem; font-weight: 700; }
.stat-card .change { color: #10b981; font-size: .85rem; }
</style>
</head>
<body>
<aside class="sidebar"><h2>DashGen</h2><nav><a href="#" class="active">Overview</a><a href="#">Revenue</a><a href="#">Customers</a></nav></aside>
<main class="main">
<h1>SaaS Analytics</h1>
<section class="stats">
<div class="stat-card"><div class="label">MRR</div><div class="value">$84,210</div><div class="change">+6.2%</div></div>
<div class="stat-card"><div class="label">Churn</div><div class="value">2.1%</div><div class="change">-0.4%</div></div>
<div class="stat-card"><div class="label">Active Users</div><div class="value">12,804</div><div class="change">+9.8%</div></div>
</section>
</main>
</body>
</html>"##,
    },
    DashboardTemplate {
        id: "ecommerce-admin",
        name: "E-commerce Admin",
        category: TemplateCategory::Ecommerce,
        description: "Complete e-commerce admin panel with orders and products",
        html: r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>E-commerce Admin</title>
<style>
body { margin: 0; font-family: system-ui, sans-serif; background: #fafaf9; color: #1c1917; }
header { background: #fff; border-bottom: 1px solid #e7e5e4; padding: 16px 32px; display: flex; justify-content: space-between; }
main { padding: 32px; }
table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 12px; overflow: hidden; }
th, td { text-align: left; padding: 12px 16px; border-bottom: 1px solid #f5f5f4; }
th { background: #f5f5f4; font-size: .8rem; text-transform: uppercase; }
.badge { padding: 2px 8px; border-radius: 999px; font-size: .75rem; background: #dcfce7; color: #166534; }
</style>
</head>
<body>
<header><strong>ShopAdmin</strong><span>Orders today: 128</span></header>
<main>
<h1>Recent Orders</h1>
<table>
<thead><tr><th>Order</th><th>Customer</th><th>Total</th><th>Status</th></tr></thead>
<tbody>
<tr><td>#10231</td><td>Maya Chen</td><td>$182.40</td><td><span class="badge">Paid</span></td></tr>
<tr><td>#10230</td><td>Omar Haddad</td><td>$64.00</td><td><span class="badge">Paid</span></td></tr>
<tr><td>#10229</td><td>Lena Fischer</td><td>$420.15</td><td><span class="badge">Shipped</span></td></tr>
</tbody>
</table>
</main>
</body>
</html>"##,
    },
    DashboardTemplate {
        id: "crm-dashboard",
        name: "CRM Dashboard",
        category: TemplateCategory::Crm,
        description: "Customer relationship management with leads and deals",
        html: r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>CRM Dashboard</title>
<style>
body { margin: 0; font-family: system-ui, sans-serif; background: #eef2ff; color: #1e1b4b; }
.main { padding: 32px; }
.pipeline { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.stage { background: #fff; border-radius: 12px; padding: 16px; }
.deal { background: #f5f3ff; border-radius: 8px; padding: 10px; margin-top: 8px; font-size: .9rem; }
</style>
</head>
<body>
<div class="main">
<h1>Sales Pipeline</h1>
<div class="pipeline">
<div class="stage"><h3>Leads</h3><div class="deal">Northwind, $12k</div><div class="deal">Globex, $8k</div></div>
<div class="stage"><h3>Qualified</h3><div class="deal">Initech, $30k</div></div>
<div class="stage"><h3>Proposal</h3><div class="deal">Umbrella, $55k</div></div>
<div class="stage"><h3>Won</h3><div class="deal">Stark Ltd, $120k</div></div>
</div>
</div>
</body>
</html>"##,
    },
    DashboardTemplate {
        id: "server-monitoring",
        name: "Server Monitoring",
        category: TemplateCategory::Admin,
        description: "Real-time server and infrastructure monitoring",
        html: r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Server Monitoring</title>
<style>
body { margin: 0; font-family: ui-monospace, monospace; background: #020617; color: #e2e8f0; padding: 32px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; }
.node { border: 1px solid #1e293b; border-radius: 10px; padding: 16px; }
.ok { color: #4ade80; } .warn { color: #facc15; }
.bar { height: 6px; background: #1e293b; border-radius: 3px; margin-top: 8px; }
.bar span { display: block; height: 100%; background: #38bdf8; border-radius: 3px; }
</style>
</head>
<body>
<h1>Infrastructure</h1>
<div class="grid">
<div class="node"><h3>api-1 <span class="ok">healthy</span></h3>CPU 42%<div class="bar"><span style="width:42%"></span></div></div>
<div class="node"><h3>api-2 <span class="ok">healthy</span></h3>CPU 37%<div class="bar"><span style="width:37%"></span></div></div>
<div class="node"><h3>db-1 <span class="warn">degraded</span></h3>CPU 88%<div class="bar"><span style="width:88%"></span></div></div>
</div>
</body>
</html>"##,
    },
];

#[must_use]
pub fn find_template(id: &str) -> Option<&'static DashboardTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates in `category`, or all of them.
#[must_use]
pub fn templates_in(category: Option<TemplateCategory>) -> Vec<&'static DashboardTemplate> {
    TEMPLATES.iter().filter(|t| category.is_none_or(|c| t.category == c)).collect()
}
